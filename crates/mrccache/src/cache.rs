//! ResponseCache: keyword and fuzzy question matching over a KvStore blob

use std::sync::Arc;

use mrckv::KvStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::ordered::OrderedMap;
use crate::stats::CacheStats;
use crate::text::{keyword_key, matched_words, normalize, significant_words};

/// A stored answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached response text
    pub answer: String,

    /// When the entry was last written, in epoch milliseconds
    pub timestamp: i64,
}

/// How a lookup was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The normalized question is itself a key
    Exact,
    /// Enough significant words overlap with a key
    Fuzzy,
}

/// A successful lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    /// The cached answer
    pub answer: String,
    /// The key that matched
    pub key: String,
    /// Which path found it
    pub kind: MatchKind,
}

type Entries = OrderedMap<String, CacheEntry>;

/// Response cache persisted as one JSON blob in a [`KvStore`]
///
/// Each written question is stored under two keys: its normalized text and
/// its keyword key (words longer than three chars). Lookups try the
/// normalized text first, then scan keys in insertion order for the first
/// one sharing enough significant words with the query.
pub struct ResponseCache<S> {
    /// Durable storage for the blob
    store: S,

    /// Entries in insertion order
    entries: Entries,

    config: CacheConfig,

    clock: Arc<dyn Clock>,

    /// Lookup statistics
    stats: CacheStats,

    /// Set when a reset could not clear the stored blob
    stale_blob: bool,
}

impl<S: KvStore> ResponseCache<S> {
    /// Open the cache and load any persisted entries
    ///
    /// # Arguments
    /// * `store` - Durable storage holding the blob
    /// * `config` - Namespace, capacity, expiry, and match threshold
    ///
    /// # Returns
    /// * `Result<ResponseCache<S>>` - Fails if the blob is unreadable or corrupt
    pub fn open(store: S, config: CacheConfig) -> Result<Self> {
        Self::open_with_clock(store, config, Arc::new(SystemClock))
    }

    /// Like [`ResponseCache::open`] with an explicit time source
    pub fn open_with_clock(store: S, config: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut cache = Self::empty(store, config, clock);
        cache.reload()?;
        Ok(cache)
    }

    /// Open the cache, starting empty if the stored blob cannot be loaded
    pub fn open_or_empty(store: S, config: CacheConfig) -> Self {
        Self::open_or_empty_with_clock(store, config, Arc::new(SystemClock))
    }

    /// Like [`ResponseCache::open_or_empty`] with an explicit time source
    pub fn open_or_empty_with_clock(store: S, config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let mut cache = Self::empty(store, config, clock);
        if let Err(e) = cache.reload() {
            warn!(
                namespace = %cache.config.namespace,
                error = %e,
                "Response cache unavailable, starting empty"
            );
        }
        cache
    }

    fn empty(store: S, config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            entries: Entries::with_capacity(config.effective_capacity()),
            config,
            clock,
            stats: CacheStats::new(),
            stale_blob: false,
        }
    }

    /// Replace the in-memory entries with the persisted ones
    ///
    /// Entries older than the expiry window are dropped, then the oldest are
    /// evicted if the blob holds more than the capacity. Nothing is written
    /// back. On error the in-memory entries are left untouched.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of entries dropped as expired
    pub fn reload(&mut self) -> Result<usize> {
        let mut entries = match self.store.get(&self.config.namespace)? {
            Some(blob) => serde_json::from_slice::<Entries>(&blob).map_err(CacheError::Corrupt)?,
            None => Entries::new(),
        };

        let now = self.clock.now_millis();
        let expiry = self.config.expiry_millis();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_sub(entry.timestamp) <= expiry);

        let expired = before - entries.len();
        if expired > 0 {
            debug!(expired, "Dropped expired cache entries");
            self.stats.record_expired(expired as u64);
        }

        self.entries = entries;
        self.stale_blob = false;
        self.evict_overflow();

        Ok(expired)
    }

    /// Persist every entry as one blob
    pub fn flush(&self) -> Result<()> {
        let blob = serde_json::to_vec(&self.entries).map_err(CacheError::Encode)?;
        self.store.put(&self.config.namespace, &blob)?;
        Ok(())
    }

    /// Cache `answer` for `question`
    ///
    /// The in-memory update always happens. The returned error only reports
    /// that persisting it failed, so the entry may not survive a restart.
    /// Questions with no word characters are ignored.
    pub fn write(&mut self, question: &str, answer: &str) -> Result<()> {
        let normalized = normalize(question);
        if normalized.trim().is_empty() {
            debug!("Ignoring blank question");
            return Ok(());
        }

        let entry = CacheEntry {
            answer: answer.to_string(),
            timestamp: self.clock.now_millis(),
        };

        let keywords = keyword_key(&normalized);
        if !keywords.is_empty() {
            self.entries.insert(keywords, entry.clone());
        }
        self.entries.insert(normalized, entry);
        self.stats.record_insert();

        self.evict_overflow();
        self.flush()?;
        self.stale_blob = false;
        Ok(())
    }

    /// Look up the cached answer for `question`
    ///
    /// Never fails; storage problems during the lazy reload count as a miss.
    pub fn read(&mut self, question: &str) -> Option<String> {
        self.lookup(question).map(|hit| hit.answer)
    }

    /// Like [`ResponseCache::read`] but reports which key matched and how
    pub fn lookup(&mut self, question: &str) -> Option<CacheHit> {
        if self.entries.is_empty() && !self.stale_blob {
            if let Err(e) = self.reload() {
                warn!(error = %e, "Failed to reload response cache, treating as miss");
            }
        }

        let normalized = normalize(question);

        if let Some(entry) = self.entries.get(normalized.as_str()) {
            self.stats.record_exact_hit();
            return Some(CacheHit {
                answer: entry.answer.clone(),
                key: normalized,
                kind: MatchKind::Exact,
            });
        }

        let words = significant_words(&normalized);
        if !words.is_empty() {
            let total = words.len() as f64;
            for (key, entry) in self.entries.iter() {
                let matched = matched_words(&words, key);
                if matched > 0 && matched as f64 / total > self.config.fuzzy_threshold {
                    self.stats.record_fuzzy_hit();
                    return Some(CacheHit {
                        answer: entry.answer.clone(),
                        key: key.clone(),
                        kind: MatchKind::Fuzzy,
                    });
                }
            }
        }

        self.stats.record_miss();
        None
    }

    /// Check whether `question` would hit on the exact path
    pub fn contains(&self, question: &str) -> bool {
        self.entries.contains_key(normalize(question).as_str())
    }

    /// Drop every entry and delete the persisted blob
    ///
    /// If the blob cannot be removed it is overwritten with an empty one.
    /// If that fails too, lazy reloads are skipped until the next successful
    /// write or explicit [`ResponseCache::reload`], so forgotten answers
    /// never come back. The remove error is returned either way.
    pub fn reset(&mut self) -> Result<()> {
        self.entries.clear();
        self.stats.reset();

        let removed = self.store.remove(&self.config.namespace);
        if let Err(e) = removed {
            self.stale_blob = self.flush().is_err();
            warn!(
                namespace = %self.config.namespace,
                error = %e,
                stale = self.stale_blob,
                "Failed to delete response cache blob"
            );
            return Err(e.into());
        }

        self.stale_blob = false;
        Ok(())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry capacity
    pub fn capacity(&self) -> usize {
        self.config.effective_capacity()
    }

    /// Get the configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Evict the oldest entries until the count is within capacity
    fn evict_overflow(&mut self) -> usize {
        let capacity = self.config.effective_capacity();
        if self.entries.len() <= capacity {
            return 0;
        }
        let excess = self.entries.len() - capacity;

        // Stable sort: equal timestamps go in insertion order
        let mut by_age: Vec<(i64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.timestamp, key.clone()))
            .collect();
        by_age.sort_by_key(|(timestamp, _)| *timestamp);

        for (_, key) in by_age.into_iter().take(excess) {
            self.entries.remove(key.as_str());
        }

        debug!(evicted = excess, "Evicted oldest cache entries");
        self.stats.record_evictions(excess as u64);
        excess
    }
}
