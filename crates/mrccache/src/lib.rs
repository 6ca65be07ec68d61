//! # mrccache
//!
//! Response cache for the MRC assistant's offline answers.
//!
//! ## Architecture
//! - **Normalization**: lowercase, word characters and whitespace only
//! - **Dual keys**: each question is stored under its normalized text and
//!   under its keyword key (words longer than three chars)
//! - **Matching**: exact key first, then the first key in insertion order
//!   sharing more than 60% of the query's significant words
//! - **Bounds**: 100 entries, oldest timestamp evicted first; entries older
//!   than 7 days are dropped on load
//! - **Persistence**: one JSON blob in an [`mrckv::KvStore`], rewritten after
//!   every write

#![warn(missing_docs)]

mod cache;
mod clock;
mod config;
mod error;
mod ordered;
mod shared;
mod stats;
mod text;

pub use cache::{CacheEntry, CacheHit, MatchKind, ResponseCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    CacheConfig, DEFAULT_CAPACITY, DEFAULT_EXPIRY, DEFAULT_FUZZY_THRESHOLD, DEFAULT_NAMESPACE,
};
pub use error::{CacheError, Result};
pub use ordered::OrderedMap;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use text::{keyword_key, match_ratio, normalize, significant_words};
