//! Error type for command handlers and its mapping to exit codes

use plugctl_config::ConfigError;
use plugctl_manifest::ResolveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown config key: {key}. Currently supported keys: {supported}")]
    UnknownConfigKey { key: String, supported: String },

    #[error("Failed to render output: {0}")]
    Render(String),
}

impl CliError {
    /// 2 for an unknown plugin, 3 for a corrupted manifest, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Resolve(e) if e.is_not_found() => 2,
            Self::Resolve(e) if e.is_malformed() => 3,
            _ => 1,
        }
    }
}
