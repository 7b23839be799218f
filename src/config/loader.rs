//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "foodtrack.toml";

/// Load configuration from foodtrack.toml, searching upward from the
/// current directory. A missing file is not an error: the client falls
/// back to the built-in defaults.
pub fn load_config() -> Result<Config> {
    match find_config_file() {
        Some(config_path) => load_config_from_path(&config_path),
        None => Ok(Config::default()),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Option<std::path::PathBuf> {
    let mut current = env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Foodtrack Configuration

[api]
# Backend host. FOODTRACK_API_URL takes precedence when set.
base_url = "${FOODTRACK_API_URL:-http://localhost:5001}"
# Some deployments expose the current-user endpoint under a different path.
me_path = "/api/users/me"
dashboard_path = "/api/users/dashboard"

[session]
# Where the login session (token, user, role) is stored.
dir = "${HOME}/.foodtrack/session"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("TEST_VAR", "hello");
        let content = "value = \"${TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_content_parses() {
        let content = interpolate_env_vars(default_config_content());
        let config: Config = toml::from_str(&content).expect("default config should parse");
        assert!(config.api.base_url.starts_with("http"));
    }
}
