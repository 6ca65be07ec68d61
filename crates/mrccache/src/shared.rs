//! Thread-safe handle to a ResponseCache

use std::sync::Arc;

use mrckv::KvStore;
use parking_lot::Mutex;

use crate::cache::{CacheHit, ResponseCache};
use crate::error::Result;

/// Cloneable handle serializing every operation on one [`ResponseCache`]
///
/// Writes, evictions, and fuzzy scans all run under the same lock, so two
/// racing writes cannot both slip past the capacity check and no scan ever
/// sees a half-updated map.
pub struct SharedCache<S> {
    inner: Arc<Mutex<ResponseCache<S>>>,
}

impl<S> Clone for SharedCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KvStore> SharedCache<S> {
    /// Wrap an opened cache
    pub fn new(cache: ResponseCache<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`ResponseCache::write`]
    pub fn write(&self, question: &str, answer: &str) -> Result<()> {
        self.inner.lock().write(question, answer)
    }

    /// See [`ResponseCache::read`]
    pub fn read(&self, question: &str) -> Option<String> {
        self.inner.lock().read(question)
    }

    /// See [`ResponseCache::lookup`]
    pub fn lookup(&self, question: &str) -> Option<CacheHit> {
        self.inner.lock().lookup(question)
    }

    /// See [`ResponseCache::reset`]
    pub fn reset(&self) -> Result<()> {
        self.inner.lock().reset()
    }

    /// See [`ResponseCache::reload`]
    pub fn reload(&self) -> Result<usize> {
        self.inner.lock().reload()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access to the cache
    pub fn with<R>(&self, f: impl FnOnce(&mut ResponseCache<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
