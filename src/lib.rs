//! Formation Cache - A bounded in-memory cache for roster analysis
//!
//! Memoizes formation analysis results behind order-independent roster keys,
//! with LRU eviction and age-based cleanup.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{derive_key, FormationCache, SharedFormationCache};
pub use config::Config;
pub use tasks::{spawn_cleanup_task, CleanupTask};
