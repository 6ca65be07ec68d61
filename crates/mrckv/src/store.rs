//! The key-value store interface shared by all backends

use std::sync::Arc;

use crate::error::Result;

/// Namespaced byte storage
///
/// Every key holds one opaque value. Implementations validate keys with
/// [`crate::validate_key`] and reject values larger than
/// [`crate::MAX_VALUE_SIZE`].
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete `key`. Returns `false` if it was not present.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Check whether `key` holds a value
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }
}
