//! Error types for the file store and its configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Classified failures surfaced by the directory entity stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target file is missing or unreadable, or no file in the
    /// directory contains a record with the requested identifier.
    #[error("{kind} not found")]
    NotFound {
        kind: &'static str,
        /// Offending file, when the failure is tied to a specific path.
        path: Option<PathBuf>,
    },

    /// A candidate file exists and is readable but does not deserialize
    /// into the expected record shape.
    #[error("{}: not a valid {kind} record", .path.display())]
    Invalid {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Directory listing, file removal, or file write failed for reasons
    /// other than the above (permissions, disk errors).
    #[error("file store I/O failure")]
    Io(#[from] std::io::Error),

    /// The operation is not offered by this backend instance.
    #[error("{op} is not supported by the {kind} file store")]
    Unsupported {
        kind: &'static str,
        op: &'static str,
    },

    /// The caller's token was cancelled; the scan stopped at an
    /// iteration boundary.
    #[error("operation cancelled")]
    Cancelled,
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str) -> Self {
        StoreError::NotFound { kind, path: None }
    }

    pub(crate) fn unreadable(kind: &'static str, path: PathBuf) -> Self {
        StoreError::NotFound {
            kind,
            path: Some(path),
        }
    }

    /// True for the NotFound classification, including unreadable files.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True when the backend does not offer the attempted operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StoreError::Unsupported { .. })
    }
}

/// Failures from loading or applying store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(String),

    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
