//! Loads the client configuration.
//!
//! Priority: environment variable > config.toml > built-in defaults.

use std::path::Path;

use briefme_core::config::{API_BASE_URL_ENV, ClientConfig};
use briefme_core::error::Result;

use crate::paths::BriefMePaths;

pub struct ConfigService {
    paths: BriefMePaths,
}

impl ConfigService {
    pub fn new(paths: BriefMePaths) -> Self {
        Self { paths }
    }

    /// Loads `config.toml` (if any) and applies the environment override.
    pub fn load(&self) -> Result<ClientConfig> {
        let config_file = self.paths.config_file()?;
        let config = Self::load_file(&config_file)?;
        Ok(Self::apply_env(config, std::env::var(API_BASE_URL_ENV).ok()))
    }

    fn load_file(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env(mut config: ClientConfig, base_url: Option<String>) -> ClientConfig {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigService::load_file(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://api.example.test\"\npublic_paths = [\"/\"]\n",
        )
        .unwrap();

        let config = ConfigService::load_file(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test");
        assert_eq!(config.public_paths, vec!["/"]);
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [").unwrap();
        assert!(ConfigService::load_file(&path).is_err());
    }

    #[test]
    fn test_env_override() {
        let config = ConfigService::apply_env(
            ClientConfig::default(),
            Some("https://env.example.test".to_string()),
        );
        assert_eq!(config.api_base_url, "https://env.example.test");

        let config = ConfigService::apply_env(ClientConfig::default(), Some("  ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }
}
