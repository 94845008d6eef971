//! Read-only configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads `config.toml`. Never creates, rewrites or persists anything.
pub struct ConfigLoader {
    default_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader for the platform config file, if the platform has a config dir.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_path: AppConfig::default_config_path(),
        }
    }

    #[must_use]
    pub fn with_default_path(path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: Some(path.into()),
        }
    }

    /// Loads the configuration.
    ///
    /// A missing default file yields `AppConfig::default()`. A file named by
    /// `path_override` must exist. A malformed file falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicitly named file is missing or any
    /// existing file cannot be read.
    pub fn load(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = match (path_override, &self.default_path) {
            (Some(path), _) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path
            }
            (None, Some(path)) if path.exists() => path.as_path(),
            (None, _) => {
                debug!("No config file, using defaults");
                return Ok(AppConfig::default());
            }
        };

        let content = fs::read_to_string(path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_default_file_is_not_created() {
        let dir = tempdir().unwrap();
        let config_file = dir.path().join("lobbyscreen").join("config.toml");
        let loader = ConfigLoader::with_default_path(&config_file);

        let config = loader.load(None).unwrap();

        assert_eq!(config.endpoint, "ws://127.0.0.1/");
        assert!(!config_file.exists());
        assert!(!dir.path().join("lobbyscreen").exists());
    }

    #[test]
    fn test_malformed_file_falls_back_and_is_untouched() {
        let dir = tempdir().unwrap();
        let config_file = dir.path().join("config.toml");
        fs::write(&config_file, "endpoint = [").unwrap();

        let config = ConfigLoader::with_default_path(&config_file).load(None).unwrap();

        assert_eq!(config.endpoint, "ws://127.0.0.1/");
        assert_eq!(fs::read_to_string(&config_file).unwrap(), "endpoint = [");
    }

    #[test]
    fn test_override_path_is_read() {
        let dir = tempdir().unwrap();
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "endpoint = \"ws://game.local:81/\"\n").unwrap();

        let loader = ConfigLoader::with_default_path(dir.path().join("unused.toml"));
        let config = loader.load(Some(&custom)).unwrap();

        assert_eq!(config.endpoint, "ws://game.local:81/");
    }

    #[test]
    fn test_missing_override_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = ConfigLoader::with_default_path(dir.path().join("unused.toml"))
            .load(Some(&missing));

        assert!(matches!(result, Err(ConfigError::NotFound(path)) if path == missing));
        assert!(!missing.exists());
    }
}
