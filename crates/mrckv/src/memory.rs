//! In-memory store

use std::collections::HashMap;

use ahash::RandomState;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::parser::{validate_key, MAX_VALUE_SIZE};
use crate::store::KvStore;

/// Volatile [`KvStore`] with the same key and size rules as [`crate::FileStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Vec<u8>, RandomState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.values.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        if value.len() > MAX_VALUE_SIZE {
            return Err(Error::ValueTooLarge(value.len()));
        }
        self.values.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.values.write().remove(key).is_some())
    }
}
