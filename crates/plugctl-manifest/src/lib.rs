//! plugctl manifest handling
//!
//! This crate owns the plugin manifest schema and the lookup that turns a
//! plugin name into a manifest. Manifests are YAML documents found either in
//! an install receipt or in the index; receipts win when both exist.

pub mod errors;
pub mod platform;
pub mod receipt;
pub mod resolver;
pub mod types;
pub mod validation;

pub use errors::ResolveError;
pub use platform::{matching_platform, PlatformTarget};
pub use receipt::Receipt;
pub use resolver::{
    load_manifest_from_receipt_or_index, resolve_with_source, LookupLocation, Resolved,
};
pub use types::{FileOperation, ObjectMeta, Platform, Plugin, PluginSpec, Selector};
