//! Cleanup Task
//!
//! Background task that periodically removes entries older than a max age.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::SharedFormationCache;

/// Spawns a background task that periodically removes old cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between runs
/// and taking the write lock for each cleanup pass.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort it during
/// shutdown. Prefer [`CleanupTask`] unless the raw handle is needed.
pub fn spawn_cleanup_task<V>(
    cache: SharedFormationCache<V>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            max_age_ms = max_age.as_millis() as u64,
            "Starting formation cache cleanup task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup(max_age);
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Cache cleanup: removed old entries");
            } else {
                debug!(remaining, "Cache cleanup: nothing to remove");
            }
        }
    })
}

// == Cleanup Task ==
/// Owned handle to the periodic cleanup task.
///
/// The task runs until [`CleanupTask::stop`] is called or the handle is dropped.
#[derive(Debug)]
pub struct CleanupTask {
    handle: Option<JoinHandle<()>>,
}

impl CleanupTask {
    /// Starts cleaning `cache` every `interval`. Must be called within a tokio runtime.
    pub fn start<V>(cache: SharedFormationCache<V>, interval: Duration, max_age: Duration) -> Self
    where
        V: Send + Sync + 'static,
    {
        Self::from_handle(spawn_cleanup_task(cache, interval, max_age))
    }

    fn from_handle(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Stops the task and waits for it to wind down.
    ///
    /// Returns `false` if the task had already died from a panic.
    pub async fn stop(mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return true;
        };
        handle.abort();
        match handle.await {
            Err(err) if !err.is_cancelled() => {
                warn!(error = %err, "Formation cache cleanup task failed");
                false
            }
            _ => {
                info!("Formation cache cleanup task stopped");
                true
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
