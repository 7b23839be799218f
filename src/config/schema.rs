//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend host. `FOODTRACK_API_URL` overrides the
    /// built-in fallback when no config file is present.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the "current user" endpoint. The backend deployments this
    /// client targets disagree on it, so it is configurable.
    #[serde(default = "default_me_path")]
    pub me_path: String,

    /// Path of the user dashboard summary endpoint.
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
}

fn default_base_url() -> String {
    env::var("FOODTRACK_API_URL").unwrap_or_else(|_| "http://localhost:5001".to_string())
}

fn default_me_path() -> String {
    "/api/users/me".to_string()
}

fn default_dashboard_path() -> String {
    "/api/users/dashboard".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            me_path: default_me_path(),
            dashboard_path: default_dashboard_path(),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the persisted session entries.
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,
}

fn default_session_dir() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".foodtrack").join("session"),
        Err(_) => PathBuf::from(".foodtrack/session"),
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
        }
    }
}

impl Config {
    /// Base URL with any trailing slash removed, so paths can always be
    /// joined with a leading one.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}
