//! Search result caching
//!
//! Listing crawls are slow and rate-limited, so finished search results are
//! kept in memory under their canonical search URL and replayed until they
//! expire. Expiry is lazy: a stale entry is evicted the moment a lookup
//! touches it, and `sweep` clears out everything stale in one pass.

use crate::jobs::JobSummary;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// One cached search result
#[derive(Debug, Clone)]
pub struct CachedSearch {
    /// The extracted records, already truncated to the search limit
    pub entries: Vec<JobSummary>,

    /// When the result was stored
    pub stored_at: DateTime<Utc>,
}

impl CachedSearch {
    /// Wraps freshly crawled records with the current timestamp
    fn new(entries: Vec<JobSummary>) -> Self {
        Self {
            entries,
            stored_at: Utc::now(),
        }
    }

    /// Checks whether the entry has outlived the given TTL
    pub fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now() - self.stored_at;
        age > ttl
    }
}

/// In-memory TTL cache of search results, keyed by canonical search URL
///
/// The cache itself is not synchronized; the engine wraps it in a `Mutex`
/// and is the only writer.
#[derive(Debug)]
pub struct SearchCache {
    entries: HashMap<String, CachedSearch>,
    ttl: Duration,
}

impl SearchCache {
    /// Creates a cache with the default 24-hour TTL
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(24))
    }

    /// Creates a cache with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Looks up a fresh result for the key
    ///
    /// A stale entry counts as a miss and is evicted on the spot, so a
    /// subsequent store starts from a clean slot.
    pub fn get(&mut self, key: &str) -> Option<Vec<JobSummary>> {
        match self.entries.get(key) {
            Some(cached) if cached.is_stale(self.ttl) => {
                self.entries.remove(key);
                None
            }
            Some(cached) => Some(cached.entries.clone()),
            None => None,
        }
    }

    /// Stores a result under the key, replacing any previous entry
    pub fn set(&mut self, key: &str, entries: Vec<JobSummary>) {
        self.entries.insert(key.to_string(), CachedSearch::new(entries));
    }

    /// Evicts every stale entry, returning how many were removed
    pub fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, cached| !cached.is_stale(ttl));
        before - self.entries.len()
    }

    /// Number of entries currently held, fresh or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds nothing at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}
