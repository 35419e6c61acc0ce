//! TTL Sweep Task
//!
//! Background task that periodically evicts expired entries from every
//! registered cache, so stale pages are reclaimed even when nobody reads
//! the keys that would lazily expire them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::invalidate::Invalidator;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the configured
/// interval between sweeps. Each sweep takes the write lock on one cache
/// at a time, so readers of other caches are never blocked for the whole
/// pass.
///
/// # Arguments
/// * `invalidator` - registry of every cache instance to sweep
/// * `sweep_interval_secs` - interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(invalidator: Invalidator, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = invalidator.evict_expired().await;

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
