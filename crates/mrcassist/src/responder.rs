//! Offline answer chain: response cache, then topic table, then general responses

use std::fmt;

use mrccache::{normalize, MatchKind, SharedCache};
use mrckv::KvStore;
use tracing::{debug, warn};

use crate::topics::{general_response, match_topic, EMPTY_QUESTION_REPLY};

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Response cache hit
    Cache(MatchKind),
    /// Static topic table
    Topic(&'static str),
    /// Canned general response
    General,
    /// Blank question
    Prompt,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::Cache(MatchKind::Exact) => write!(f, "cache (exact)"),
            ReplySource::Cache(MatchKind::Fuzzy) => write!(f, "cache (fuzzy)"),
            ReplySource::Topic(name) => write!(f, "topic ({})", name),
            ReplySource::General => write!(f, "general"),
            ReplySource::Prompt => write!(f, "prompt"),
        }
    }
}

/// Outcome of [`Responder::remember`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remembered {
    /// Cached and persisted
    Stored,
    /// Cached, but only in memory because persisting failed
    MemoryOnly,
    /// Nothing cached; the question has no word characters
    Blank,
}

/// An answer and its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct Responder<S> {
    cache: SharedCache<S>,
}

impl<S: KvStore> Responder<S> {
    pub fn new(cache: SharedCache<S>) -> Self {
        Self { cache }
    }

    /// Answer a question; never fails
    pub fn answer(&self, question: &str) -> Reply {
        let normalized = normalize(question);
        if normalized.trim().is_empty() {
            return Reply {
                text: EMPTY_QUESTION_REPLY.to_string(),
                source: ReplySource::Prompt,
            };
        }

        if let Some(hit) = self.cache.lookup(question) {
            debug!(key = %hit.key, kind = ?hit.kind, "Answered from cache");
            return Reply {
                text: hit.answer,
                source: ReplySource::Cache(hit.kind),
            };
        }

        if let Some(topic) = match_topic(&normalized) {
            debug!(topic = topic.name, "Answered from topic table");
            return Reply {
                text: topic.answer.to_string(),
                source: ReplySource::Topic(topic.name),
            };
        }

        Reply {
            text: general_response(&normalized).to_string(),
            source: ReplySource::General,
        }
    }

    /// Cache an answer for later lookups
    pub fn remember(&self, question: &str, answer: &str) -> Remembered {
        if normalize(question).trim().is_empty() {
            return Remembered::Blank;
        }

        match self.cache.write(question, answer) {
            Ok(()) => Remembered::Stored,
            Err(e) => {
                warn!(error = %e, "Failed to persist cached answer");
                Remembered::MemoryOnly
            }
        }
    }

    /// Drop every cached answer
    pub fn forget_all(&self) -> mrccache::Result<()> {
        self.cache.reset()
    }

    pub fn cache(&self) -> &SharedCache<S> {
        &self.cache
    }
}
