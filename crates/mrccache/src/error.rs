//! Error types for mrccache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Failures of the durable side of the cache
///
/// The in-memory side never fails. Callers on the request path usually log
/// these and carry on with an empty or unsaved cache.
#[derive(Debug)]
pub enum CacheError {
    /// Store unavailable, closed, or rejected the value
    Store(mrckv::Error),

    /// Persisted blob is not a valid cache map
    Corrupt(serde_json::Error),

    /// Entries could not be encoded
    Encode(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Store(e) => write!(f, "Store error: {}", e),
            CacheError::Corrupt(e) => write!(f, "Corrupt cache blob: {}", e),
            CacheError::Encode(e) => write!(f, "Failed to encode cache: {}", e),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Store(e) => Some(e),
            CacheError::Corrupt(e) | CacheError::Encode(e) => Some(e),
        }
    }
}

impl From<mrckv::Error> for CacheError {
    fn from(err: mrckv::Error) -> Self {
        CacheError::Store(err)
    }
}
