//! Formation Cache Store
//!
//! Bounded key-value store combining HashMap storage with LRU tracking and
//! age-based cleanup. Every operation is total: an empty key degrades to a
//! miss, a no-op or `false`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock, DEFAULT_CAPACITY};

// == Formation Cache ==
/// Bounded memoization store for formation analysis results.
#[derive(Debug)]
pub struct FormationCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency order
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl<V> Default for FormationCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V> FormationCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, using wall-clock time.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Creates a cache stamping entries from the given clock.
    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            clock,
        }
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    ///
    /// A new key arriving at capacity evicts the least recently used entry
    /// first. Replacing an existing key never evicts.
    pub fn set(&mut self, key: &str, value: V) {
        if key.is_empty() {
            return;
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(value, self.clock.now_ms());
        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Peek ==
    /// Reads an entry without promoting it or counting a lookup.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        if key.is_empty() {
            return None;
        }
        self.entries.get(key)
    }

    // == Has ==
    /// Membership test; leaves recency untouched.
    pub fn has(&self, key: &str) -> bool {
        !key.is_empty() && self.entries.contains_key(key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup ==
    /// Removes every entry strictly older than `max_age`.
    ///
    /// Surviving entries keep their recency order. Returns the number removed.
    pub fn cleanup(&mut self, max_age: Duration) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        self.entries
            .retain(|_, entry| !entry.is_older_than(max_age, now));
        let entries = &self.entries;
        self.lru.retain(|key| entries.contains_key(key));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.lru.iter()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> FormationCache<V> {
    // == Get ==
    /// Returns a copy of the entry for `key` and marks it most recently used.
    ///
    /// Stale entries still hit until `cleanup` removes them.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry<V>> {
        if key.is_empty() {
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                let entry = entry.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                Some(entry)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }
}
