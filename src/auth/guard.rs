//! Section routing guard
//!
//! Every protected screen runs the guard before fetching or rendering
//! anything. The decision is a pure function over the session snapshot, so
//! the redirect matrix is unit-testable without a terminal or a backend;
//! the caller performs the actual "navigation".

use crate::auth::models::Role;
use crate::auth::session::SessionSnapshot;

/// The area a screen belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Login, registration, initial setup
    Public,
    /// Dashboard, foods, meals, profile
    User,
    /// User management, admin CRUD, reports
    Admin,
}

/// Where a misplaced visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    UserHome,
    AdminHome,
}

impl Destination {
    /// The command that takes the visitor there.
    pub fn command(&self) -> &'static str {
        match self {
            Destination::Login => "foodtrack login",
            Destination::UserHome => "foodtrack dashboard",
            Destination::AdminHome => "foodtrack admin dashboard",
        }
    }
}

/// Outcome of a guard check. A screen renders only on `Allow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Destination),
}

/// Decide whether the session may enter the section.
///
/// No token means login, whatever the section. A token in the wrong
/// section routes to the home of the session's actual role; role matching
/// is case-insensitive, and unrecognized roles count as plain users.
pub fn check(session: &SessionSnapshot, section: Section) -> GuardDecision {
    if section == Section::Public {
        return GuardDecision::Allow;
    }

    if !session.is_authenticated() {
        return GuardDecision::Redirect(Destination::Login);
    }

    match (section, session.role()) {
        (Section::Admin, Role::User) => GuardDecision::Redirect(Destination::UserHome),
        (Section::User, Role::Admin) => GuardDecision::Redirect(Destination::AdminHome),
        _ => GuardDecision::Allow,
    }
}
