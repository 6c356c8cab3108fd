//! Error types for CMS store

use std::path::PathBuf;

/// Persistence error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored value is not valid JSON for the expected shape
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Stored session belongs to another document type or format version
    #[error("incompatible session at {key}: {reason}")]
    Incompatible {
        /// Storage key
        key: String,
        /// What did not match
        reason: String,
    },

    /// Key cannot be stored
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the stored data should be discarded rather than retried
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Incompatible { .. } | Self::Serde(_))
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
