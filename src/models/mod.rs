//! Models Module
//!
//! Roster records as they arrive from exported game data, and the summaries
//! memoized for them.

pub mod roster;
pub mod summary;

pub use roster::{normalize_roster, PlayerFingerprint};
pub use summary::{RosterResult, RosterSummary, RunReport};
