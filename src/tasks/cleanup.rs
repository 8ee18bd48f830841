//! Expiry Sweeper
//!
//! Expired records already read as absent; the sweeper reclaims their memory
//! so idle keys do not sit in the store until capacity eviction finds them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a task that sweeps expired entries every `interval_secs` seconds.
///
/// The task never ends on its own; abort the returned handle on shutdown.
/// A zero interval is treated as one second.
pub fn spawn_cleanup_task(store: MemoryStore, interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!("Expiry sweeper running every {}s", period.as_secs());

        let mut ticker = tokio::time::interval(period);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = store.sweep_expired().await;
            if removed > 0 {
                info!(removed, "Swept expired records");
            } else {
                debug!("Sweep found no expired records");
            }
        }
    })
}
