use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::LookupLocation;

/// Outcome of a failed receipt-or-index lookup
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Neither a receipt nor an index entry exists
    #[error("plugin \"{name}\" not found")]
    NotFound { name: String },

    /// A file was found but is not a valid manifest
    #[error("failed to parse plugin manifest from {location} {path}: {source}")]
    Malformed {
        location: LookupLocation,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Any read failure other than a missing file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("plugin name \"{name}\" not allowed")]
    InvalidName { name: String },
}

impl ResolveError {
    /// Whether this error means "no such plugin"
    ///
    /// Holds for [`ResolveError::NotFound`] and for raw I/O errors of kind
    /// [`io::ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ResolveError::Malformed { .. })
    }

    /// The I/O classification of this error, if it has one
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            ResolveError::NotFound { .. } => Some(io::ErrorKind::NotFound),
            ResolveError::Io { source, .. } => Some(source.kind()),
            ResolveError::Malformed { .. } | ResolveError::InvalidName { .. } => None,
        }
    }
}

impl From<ResolveError> for io::Error {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Io { source, .. } => source,
            other => {
                let kind = match other {
                    ResolveError::NotFound { .. } => io::ErrorKind::NotFound,
                    ResolveError::Malformed { .. } => io::ErrorKind::InvalidData,
                    ResolveError::InvalidName { .. } | ResolveError::Io { .. } => {
                        io::ErrorKind::InvalidInput
                    }
                };
                io::Error::new(kind, other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_converts_to_io_not_found() {
        let err = ResolveError::NotFound {
            name: "ctx".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_malformed());

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert_eq!(io_err.to_string(), "plugin \"ctx\" not found");
    }

    #[test]
    fn test_raw_io_error_keeps_its_kind() {
        let err = ResolveError::Io {
            path: PathBuf::from("/root/receipts/ctx.yaml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_malformed_is_not_a_missing_resource() {
        let Err(source) = serde_yaml::from_str::<crate::types::Plugin>("invalid yaml file")
        else {
            return;
        };
        let err = ResolveError::Malformed {
            location: LookupLocation::Receipt,
            path: PathBuf::from("receipts/ctx.yaml"),
            source,
        };
        assert!(err.is_malformed());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("install receipt"));

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
