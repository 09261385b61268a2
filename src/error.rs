//! Error types for the formation cache
//!
//! Cache operations themselves never fail; these cover configuration and
//! roster loading around them.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration values that cannot run
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Roster document could not be read or parsed
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::InvalidRoster(err.to_string())
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::InvalidRoster(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
