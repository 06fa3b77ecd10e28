//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries. Reads
//! already drop expired entries on their own; the sweep only reclaims memory
//! held by entries nobody reads anymore.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheManager;

/// Control handle for a running sweep task.
///
/// Dropping the handle also stops the task at its next wake-up.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to stop and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                warn!("Sweep task ended abnormally: {}", e);
            }
        }
    }

    /// Kills the task without waiting.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a task that calls [`CacheManager::cleanup_expired`] every
/// `interval`.
///
/// The first sweep runs one full interval after spawning.
///
/// # Example
/// ```ignore
/// let cache = CacheManager::<String>::new(100, Duration::from_secs(300));
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweep_task<V>(cache: CacheManager<V>, interval: Duration) -> SweepHandle
where
    V: Clone + Send + Sync + 'static,
{
    let period = interval.max(Duration::from_millis(1));
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!("Starting expiry sweep with interval of {:?}", period);

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("Expiry sweep stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.cleanup_expired().await;
                    if removed > 0 {
                        info!("Expiry sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
            }
        }
    });

    SweepHandle {
        shutdown: Some(shutdown_tx),
        handle,
    }
}
