//! Cache configuration

use std::time::Duration;

/// Store key the cache blob is persisted under
pub const DEFAULT_NAMESPACE: &str = "mrc_assistant_cache";

/// Maximum number of entries kept
pub const DEFAULT_CAPACITY: usize = 100;

/// Entries older than this are dropped on load (7 days)
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A fuzzy match needs a ratio strictly above this
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Tunables for [`crate::ResponseCache`]
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Store key for the persisted blob
    pub namespace: String,

    /// Maximum number of entries (a value of 0 is treated as 1)
    pub capacity: usize,

    /// Age past which entries are dropped on load
    pub expiry: Duration,

    /// Minimum fuzzy match ratio, exclusive
    pub fuzzy_threshold: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            capacity: DEFAULT_CAPACITY,
            expiry: DEFAULT_EXPIRY,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl CacheConfig {
    /// Set the store namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the entry capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the expiry window
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Set the fuzzy match threshold
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }

    pub(crate) fn expiry_millis(&self) -> i64 {
        i64::try_from(self.expiry.as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();

        assert_eq!(config.namespace, "mrc_assistant_cache");
        assert_eq!(config.capacity, 100);
        assert_eq!(config.expiry_millis(), 7 * 24 * 60 * 60 * 1000);
        assert_eq!(config.fuzzy_threshold, 0.6);
    }

    #[test]
    fn test_builders() {
        let config = CacheConfig::default()
            .with_namespace("test_ns")
            .with_capacity(0)
            .with_expiry(Duration::from_secs(60))
            .with_fuzzy_threshold(0.5);

        assert_eq!(config.namespace, "test_ns");
        assert_eq!(config.effective_capacity(), 1);
        assert_eq!(config.expiry_millis(), 60_000);
        assert_eq!(config.fuzzy_threshold, 0.5);
    }

    #[test]
    fn test_huge_expiry_saturates() {
        let config = CacheConfig::default().with_expiry(Duration::MAX);
        assert_eq!(config.expiry_millis(), i64::MAX);
    }
}
