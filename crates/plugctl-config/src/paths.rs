//! Directory layout of a plugctl root
//!
//! Every location plugctl reads or writes is derived from a single root
//! directory:
//!
//! ```text
//! <root>/
//! ├── bin/                      # symlinks to plugin executables
//! ├── index/
//! │   └── plugins/<name>.yaml   # catalog of published manifests
//! ├── receipts/<name>.yaml      # manifests frozen at install time
//! └── store/<name>/<version>/   # unpacked plugin versions
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};

/// Environment variable that overrides the root directory.
pub const ROOT_ENV_VAR: &str = "PLUGCTL_ROOT";

/// Name of the root directory under the user's home when nothing else is configured.
pub const DEFAULT_ROOT_DIR: &str = ".plugctl";

/// File extension used for index entries and receipts.
pub const MANIFEST_EXTENSION: &str = "yaml";

/// Supplies the two locations a manifest can be looked up in.
///
/// The resolver only depends on this trait, so tests and embedders can point
/// it at any layout.
pub trait PathProvider {
    /// Path of the install receipt for `plugin_name`.
    fn plugin_install_receipt_path(&self, plugin_name: &str) -> PathBuf;

    /// Directory holding one `<name>.yaml` file per indexed plugin.
    fn index_plugins_path(&self) -> PathBuf;

    /// Path of the index entry for `plugin_name`.
    fn index_plugin_path(&self, plugin_name: &str) -> PathBuf {
        self.index_plugins_path()
            .join(manifest_file_name(plugin_name))
    }
}

/// Layout rooted at a base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    base: PathBuf,
}

impl Paths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Locate the root from the environment, the config file, or the home directory
    pub fn discover() -> Result<Self, ConfigError> {
        let env_root = std::env::var_os(ROOT_ENV_VAR);
        let config = if env_root.as_ref().is_some_and(|r| !r.is_empty()) {
            Config::default()
        } else {
            Config::load()?
        };
        let root = resolve_root(env_root, &config, dirs::home_dir())?;
        Ok(Self::new(root))
    }

    pub fn base_path(&self) -> &Path {
        &self.base
    }

    pub fn index_base_path(&self) -> PathBuf {
        self.base.join("index")
    }

    pub fn install_receipts_path(&self) -> PathBuf {
        self.base.join("receipts")
    }

    pub fn bin_path(&self) -> PathBuf {
        self.base.join("bin")
    }

    pub fn install_path(&self) -> PathBuf {
        self.base.join("store")
    }

    pub fn plugin_install_path(&self, plugin_name: &str) -> PathBuf {
        self.install_path().join(plugin_name)
    }

    pub fn plugin_version_install_path(&self, plugin_name: &str, version: &str) -> PathBuf {
        self.plugin_install_path(plugin_name).join(version)
    }
}

impl PathProvider for Paths {
    fn plugin_install_receipt_path(&self, plugin_name: &str) -> PathBuf {
        self.install_receipts_path()
            .join(manifest_file_name(plugin_name))
    }

    fn index_plugins_path(&self) -> PathBuf {
        self.index_base_path().join("plugins")
    }
}

fn manifest_file_name(plugin_name: &str) -> String {
    format!("{}.{}", plugin_name, MANIFEST_EXTENSION)
}

/// Pick the root directory
///
/// Precedence: a non-empty `env_root`, then `root` from the config file,
/// then `<home>/.plugctl`.
pub fn resolve_root(
    env_root: Option<OsString>,
    config: &Config,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(root) = env_root.filter(|r| !r.is_empty()) {
        tracing::debug!("Using root from {}: {:?}", ROOT_ENV_VAR, root);
        return Ok(PathBuf::from(root));
    }

    if let Some(root) = &config.root {
        tracing::debug!("Using root from config file: {}", root.display());
        return Ok(root.clone());
    }

    home.map(|h| h.join(DEFAULT_ROOT_DIR))
        .ok_or(ConfigError::HomeNotFound)
}
