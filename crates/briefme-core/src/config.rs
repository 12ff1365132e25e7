use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_LOGIN_PATH, DEFAULT_PUBLIC_PATHS};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding `api_base_url`.
pub const API_BASE_URL_ENV: &str = "BRIEFME_API_URL";

/// Client configuration stored in `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL relative request paths are resolved against
    pub api_base_url: String,
    pub login_path: String,
    /// Paths that never force a redirect to the login screen
    pub public_paths: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig =
            toml::from_str(r#"api_base_url = "https://example.test/api""#).unwrap();
        assert_eq!(config.api_base_url, "https://example.test/api");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.public_paths, vec!["/", "/login", "/onboarding"]);
    }
}
