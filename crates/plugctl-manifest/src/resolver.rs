//! Receipt-then-index manifest resolution
//!
//! An installed plugin's receipt is authoritative: it records exactly what
//! was installed, even if the index entry has since changed or been deleted.
//! The index is only consulted when no receipt exists.
//!
//! ```text
//! Start -> CheckReceipt -> Found | Malformed(receipt) | CheckIndex
//! CheckIndex            -> Found | Malformed(index)   | NotFound
//! ```
//!
//! A receipt that exists but cannot be parsed is reported as-is. It is never
//! masked by a valid index entry.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use plugctl_config::PathProvider;

use crate::errors::ResolveError;
use crate::receipt::Receipt;
use crate::types::Plugin;
use crate::validation::is_safe_plugin_name;

/// Where a manifest was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupLocation {
    Receipt,
    IndexEntry,
}

impl fmt::Display for LookupLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupLocation::Receipt => write!(f, "install receipt"),
            LookupLocation::IndexEntry => write!(f, "index entry"),
        }
    }
}

/// A successfully resolved manifest and its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub plugin: Plugin,
    pub location: LookupLocation,
    /// Index recorded in the receipt's status block, if any
    pub source_index: Option<String>,
}

/// Load the manifest for `plugin_name`, preferring its install receipt
pub fn load_manifest_from_receipt_or_index<P>(
    paths: &P,
    plugin_name: &str,
) -> Result<Plugin, ResolveError>
where
    P: PathProvider + ?Sized,
{
    resolve_with_source(paths, plugin_name).map(|resolved| resolved.plugin)
}

/// Same lookup as [`load_manifest_from_receipt_or_index`], also reporting
/// which location answered
pub fn resolve_with_source<P>(paths: &P, plugin_name: &str) -> Result<Resolved, ResolveError>
where
    P: PathProvider + ?Sized,
{
    if !is_safe_plugin_name(plugin_name) {
        return Err(ResolveError::InvalidName {
            name: plugin_name.to_string(),
        });
    }

    let receipt_path = paths.plugin_install_receipt_path(plugin_name);
    if let Some(bytes) = read_if_exists(&receipt_path)? {
        let receipt: Receipt = parse(&bytes, LookupLocation::Receipt, &receipt_path)?;
        debug!("Found plugin manifest for {:?} in the receipts dir", plugin_name);
        let source_index = receipt.source_index().map(str::to_string);
        return Ok(Resolved {
            plugin: receipt.plugin,
            location: LookupLocation::Receipt,
            source_index,
        });
    }
    debug!("Plugin manifest for {:?} not found in the receipts dir", plugin_name);

    let index_path = paths.index_plugin_path(plugin_name);
    if let Some(bytes) = read_if_exists(&index_path)? {
        let plugin: Plugin = parse(&bytes, LookupLocation::IndexEntry, &index_path)?;
        debug!("Found plugin manifest for {:?} in the index", plugin_name);
        return Ok(Resolved {
            plugin,
            location: LookupLocation::IndexEntry,
            source_index: None,
        });
    }
    debug!("Plugin manifest for {:?} not found in the index", plugin_name);

    Err(ResolveError::NotFound {
        name: plugin_name.to_string(),
    })
}

/// Read a whole file, mapping only a missing file to `None`
fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, ResolveError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ResolveError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse<T>(bytes: &[u8], location: LookupLocation, path: &Path) -> Result<T, ResolveError>
where
    T: serde::de::DeserializeOwned,
{
    serde_yaml::from_slice(bytes).map_err(|source| ResolveError::Malformed {
        location,
        path: path.to_path_buf(),
        source,
    })
}
