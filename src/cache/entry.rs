//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

// == Cache Entry ==
/// A stored value stamped with its insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (clock milliseconds)
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since insertion.
    ///
    /// Saturates at zero if the clock moved backwards.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Older Than ==
    /// Checks whether the entry has outlived `max_age`.
    ///
    /// Boundary condition: an entry exactly `max_age` old is still kept; it
    /// must be strictly older to be removed.
    pub fn is_older_than(&self, max_age: Duration, now_ms: u64) -> bool {
        self.age_ms(now_ms) > max_age.as_millis() as u64
    }
}
