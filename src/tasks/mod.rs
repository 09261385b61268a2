//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Cleanup: Removes entries older than the configured max age

mod cleanup;

pub use cleanup::{spawn_cleanup_task, CleanupTask};
