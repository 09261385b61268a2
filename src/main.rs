//! Formation Cache - host binary
//!
//! Summarizes roster files, memoizing each summary under its derived roster
//! key so repeated or reordered rosters are served from the cache.
//!
//! Usage: `formation-cache <roster.json>...`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formation_cache::cache::{derive_key_from_fingerprints, FormationCache, SharedFormationCache};
use formation_cache::error::CacheError;
use formation_cache::models::{normalize_roster, RosterResult, RosterSummary, RunReport};
use formation_cache::{CleanupTask, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the shared cache and start the cleanup task
/// 4. Summarize every roster file given on the command line
/// 5. Stop the cleanup task and print the run report
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formation_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: capacity={}, max_age={}ms, cleanup_interval={}ms, discriminator={}",
        config.capacity, config.max_age_ms, config.cleanup_interval_ms, config.discriminator
    );

    let cache: SharedFormationCache<RosterSummary> =
        Arc::new(RwLock::new(FormationCache::new(config.capacity)));
    let cleanup = CleanupTask::start(cache.clone(), config.cleanup_interval(), config.max_age());

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        warn!("No roster files given");
    }

    for file in &files {
        match load_roster(Path::new(file)) {
            Ok(roster) => match summarize(&cache, &config.discriminator, file, &roster).await {
                Some(result) => println!("{}", serde_json::to_string(&result)?),
                None => warn!(file = %file, "Roster is not a JSON array, skipping"),
            },
            Err(err) => warn!(file = %file, error = %err, "Skipping roster"),
        }
    }

    cleanup.stop().await;

    let report = RunReport::new(cache.read().await.stats());
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing run report")?
    );

    Ok(())
}

fn load_roster(path: &Path) -> Result<Value, CacheError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Looks the roster up in the cache, computing and storing it on a miss.
async fn summarize(
    cache: &SharedFormationCache<RosterSummary>,
    discriminator: &str,
    file: &str,
    roster: &Value,
) -> Option<RosterResult> {
    let players = normalize_roster(roster)?;
    let key = derive_key_from_fingerprints(&players, discriminator);

    // Lookup and store take the lock separately; a concurrent caller may
    // compute the same summary in between, and the later set wins.
    let cached = cache.write().await.get(&key);
    if let Some(entry) = cached {
        info!(key = %key, "Cache hit");
        return Some(RosterResult {
            file: file.to_string(),
            key,
            cached: true,
            summary: entry.value,
        });
    }

    let summary = RosterSummary::from_fingerprints(&players);
    cache.write().await.set(&key, summary.clone());
    info!(key = %key, players = players.len(), "Cache miss, summary stored");

    Some(RosterResult {
        file: file.to_string(),
        key,
        cached: false,
        summary,
    })
}
