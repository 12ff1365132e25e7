//! Unified path management for Brief Me files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/briefme/           # Config directory
//! ├── config.toml              # Client configuration
//! ├── storage.toml             # Persisted client storage (token, session, view state)
//! └── logs/                    # Application logs
//!     └── briefme.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use briefme_core::BriefMeError;
use thiserror::Error;

const APP_DIR: &str = "briefme";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

impl From<PathError> for BriefMeError {
    fn from(err: PathError) -> Self {
        BriefMeError::config(err.to_string())
    }
}

/// Resolves every file location the client uses.
///
/// With a base path, everything lives directly under it. This is what tests
/// and portable installs use.
#[derive(Debug, Clone, Default)]
pub struct BriefMePaths {
    base: Option<PathBuf>,
}

impl BriefMePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory, e.g. `~/.config/briefme/`.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the persisted client storage document.
    ///
    /// Holds the bearer token, so it is written with owner-only permissions.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_dir() {
        // Not every CI box has a config dir; only check the suffix when it does
        if let Ok(dir) = BriefMePaths::default().config_dir() {
            assert!(dir.ends_with("briefme"));
        }
    }

    #[test]
    fn test_base_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BriefMePaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_dir().unwrap(), temp_dir.path());
        assert_eq!(
            paths.config_file().unwrap(),
            temp_dir.path().join("config.toml")
        );
        assert_eq!(
            paths.storage_file().unwrap(),
            temp_dir.path().join("storage.toml")
        );
        assert!(paths.logs_dir().unwrap().starts_with(temp_dir.path()));
    }
}
