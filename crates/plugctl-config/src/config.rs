use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV_VAR: &str = "PLUGCTL_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    HomeNotFound,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Root directory holding receipts, the index and installed plugins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        // Honor explicit override for tests / isolated runs.
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(ConfigError::HomeNotFound)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(ConfigError::HomeNotFound)?;

        Ok(base.join("plugctl").join("plugctl.toml"))
    }

    /// Load from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(ConfigError::Io(err)),
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let config = Config::load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(config.is_ok_and(|c| c == Config::default()));
    }

    #[test]
    fn test_save_and_load() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("nested").join("plugctl.toml");
        let config = Config {
            root: Some(PathBuf::from("/opt/plugctl")),
        };

        assert!(config.save_to_path(&path).is_ok(), "Failed to save config");
        let loaded = Config::load_from_path(&path);
        assert!(loaded.is_ok_and(|c| c == config));
    }

    #[test]
    fn test_malformed_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("plugctl.toml");
        assert!(fs::write(&path, "root = [").is_ok());

        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
