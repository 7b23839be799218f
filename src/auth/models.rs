//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account roles for section routing.
///
/// Roles arrive from the backend and from stored sessions as free-form
/// strings; parsing is case-insensitive and anything unrecognized
/// normalizes to [`Role::User`], so an unknown role can never reach the
/// admin section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Administrator - full access to the admin section
    Admin,
    /// Regular user - foods, meals and profile
    #[default]
    User,
}

impl Role {
    /// Parse a role string the way the backend spells it, ignoring case.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// Canonical wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User profile as returned by the backend.
///
/// Every field is defaulted so a partial or drifted response shape still
/// deserializes instead of failing the whole screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Transient result of a successful login: consumed once to populate the
/// session store, then discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}
