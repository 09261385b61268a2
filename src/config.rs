//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{
    DEFAULT_CAPACITY, DEFAULT_CLEANUP_INTERVAL, DEFAULT_DISCRIMINATOR, DEFAULT_MAX_AGE,
};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Entries older than this are removed by cleanup (milliseconds)
    pub max_age_ms: u64,
    /// Background cleanup task interval (milliseconds)
    pub cleanup_interval_ms: u64,
    /// Key space prefix used when deriving roster keys
    pub discriminator: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FORMATION_CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `FORMATION_CACHE_MAX_AGE_MS` - Entry max age (default: 600000)
    /// - `FORMATION_CACHE_CLEANUP_INTERVAL_MS` - Cleanup frequency (default: 300000)
    /// - `FORMATION_CACHE_DISCRIMINATOR` - Key prefix (default: "team")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("FORMATION_CACHE_CAPACITY").unwrap_or(defaults.capacity),
            max_age_ms: parse_var("FORMATION_CACHE_MAX_AGE_MS").unwrap_or(defaults.max_age_ms),
            cleanup_interval_ms: parse_var("FORMATION_CACHE_CLEANUP_INTERVAL_MS")
                .unwrap_or(defaults.cleanup_interval_ms),
            discriminator: env::var("FORMATION_CACHE_DISCRIMINATOR")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.discriminator),
        }
    }

    /// Rejects values the cache or the cleanup task cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.cleanup_interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "cleanup interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_age_ms: DEFAULT_MAX_AGE.as_millis() as u64,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL.as_millis() as u64,
            discriminator: DEFAULT_DISCRIMINATOR.to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.max_age_ms, 600_000);
        assert_eq!(config.cleanup_interval_ms, 300_000);
        assert_eq!(config.discriminator, "team");
        assert_ok!(config.validate());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("FORMATION_CACHE_CAPACITY");
        env::remove_var("FORMATION_CACHE_MAX_AGE_MS");
        env::remove_var("FORMATION_CACHE_CLEANUP_INTERVAL_MS");
        env::remove_var("FORMATION_CACHE_DISCRIMINATOR");

        let config = Config::from_env();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.max_age(), Duration::from_secs(600));
        assert_eq!(config.cleanup_interval(), Duration::from_secs(300));
        assert_eq!(config.discriminator, "team");
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config {
            cleanup_interval_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }
}
