//! Durable session storage
//!
//! The session lives on disk as three entries under one directory, exactly
//! the keys the web client kept in browser storage: the bearer token, the
//! user profile as JSON text, and the role string. Written on login or
//! registration, read at the top of every protected command, cleared on
//! logout.

use crate::auth::models::{Role, User};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";
const ROLE_FILE: &str = "role";

/// A point-in-time view of the persisted session.
///
/// Reads never fail: a missing or malformed entry is simply absent, and the
/// caller sees an unauthenticated (or role-less) session instead of an error.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<User>,
    pub role: Option<String>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Normalized role: the stored role string, falling back to the stored
    /// user's role, else [`Role::User`].
    pub fn role(&self) -> Role {
        match &self.role {
            Some(raw) => Role::parse(raw),
            None => self.user.as_ref().map(|u| u.role).unwrap_or_default(),
        }
    }
}

/// File-backed store for the three session entries.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a freshly authenticated session. Overwrites unconditionally.
    ///
    /// The role entry is always derived from `user.role`, keeping the
    /// invariant that the two never drift apart.
    pub fn write(&self, token: &str, user: &User) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TOKEN_FILE), token)?;
        fs::write(self.dir.join(USER_FILE), serde_json::to_string(user)?)?;
        fs::write(self.dir.join(ROLE_FILE), user.role.as_str())?;
        Ok(())
    }

    /// Replace the stored user profile (and the role derived from it)
    /// without touching the token. Used after a profile update.
    pub fn update_user(&self, user: &User) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(USER_FILE), serde_json::to_string(user)?)?;
        fs::write(self.dir.join(ROLE_FILE), user.role.as_str())?;
        Ok(())
    }

    /// Read the current session. Never errors: missing entries read as
    /// `None`, and a user entry that fails to deserialize degrades to
    /// `None` rather than poisoning the whole session.
    pub fn read(&self) -> SessionSnapshot {
        let token = self.read_entry(TOKEN_FILE);
        let role = self.read_entry(ROLE_FILE);
        let user = self
            .read_entry(USER_FILE)
            .and_then(|text| match serde_json::from_str::<User>(&text) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::debug!("stored user entry is malformed, treating as absent: {}", e);
                    None
                }
            });

        SessionSnapshot { token, user, role }
    }

    /// Remove all session entries. Idempotent: clearing an already-empty
    /// store succeeds.
    pub fn clear(&self) -> Result<()> {
        for file in [TOKEN_FILE, USER_FILE, ROLE_FILE] {
            match fs::remove_file(self.dir.join(file)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn read_entry(&self, file: &str) -> Option<String> {
        let content = fs::read_to_string(self.dir.join(file)).ok()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
