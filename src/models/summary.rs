//! Summary DTOs
//!
//! Values the host binary memoizes per roster and the report it prints.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::PlayerFingerprint;

/// Aggregate view of one roster, cached under the roster's key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSummary {
    /// Number of players in the roster
    pub player_count: usize,
    /// Mean overall rating of players with a numeric rating
    pub average_overall: f64,
    /// Distinct short position codes, sorted
    pub positions: Vec<String>,
}

impl RosterSummary {
    /// Summarizes a normalized roster.
    pub fn from_fingerprints(players: &[PlayerFingerprint]) -> Self {
        let ratings: Vec<f64> = players
            .iter()
            .filter_map(PlayerFingerprint::overall_rating)
            .collect();
        let average_overall = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        let positions: BTreeSet<&str> = players
            .iter()
            .flat_map(|p| p.short_positions.iter().map(String::as_str))
            .filter(|code| !code.is_empty())
            .collect();

        Self {
            player_count: players.len(),
            average_overall,
            positions: positions.into_iter().map(str::to_string).collect(),
        }
    }
}

/// One output line per processed roster file.
#[derive(Debug, Clone, Serialize)]
pub struct RosterResult {
    pub file: String,
    pub key: String,
    /// Whether the summary came from the cache
    pub cached: bool,
    pub summary: RosterSummary,
}

/// Final report printed when the binary exits.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub stats: CacheStats,
    pub hit_rate: f64,
    /// RFC 3339 generation time
    pub generated_at: String,
}

impl RunReport {
    pub fn new(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
