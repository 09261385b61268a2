//! Cache Module
//!
//! Provides the bounded formation cache: roster key derivation, LRU eviction
//! and age-based cleanup.

mod clock;
mod entry;
mod key;
mod lru;
mod stats;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{derive_key, derive_key_from_fingerprints, rolling_hash, to_base36};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::FormationCache;

/// Cache shared between callers and the cleanup task.
pub type SharedFormationCache<V> = Arc<RwLock<FormationCache<V>>>;

// == Public Constants ==
/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 100;

/// Default age after which cleanup removes an entry
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Default period of the background cleanup task
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Default key space prefix
pub const DEFAULT_DISCRIMINATOR: &str = "team";
