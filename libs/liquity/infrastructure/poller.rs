//! Store Poller
//!
//! Keeps the store fresh by polling a snapshot source on a fixed interval.
//! A failed poll leaves the previous snapshot in place, so views keep
//! rendering the last known state until the source recovers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::source::{SnapshotSource, SourceError};
use super::store::LiquityStore;

/// Polls a `SnapshotSource` and publishes changed snapshots to the store
pub struct StorePoller {
    poll_interval: Duration,
    consecutive_failures: Arc<AtomicU64>,
    task_handle: Option<JoinHandle<()>>,
}

impl StorePoller {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            consecutive_failures: Arc::new(AtomicU64::new(0)),
            task_handle: None,
        }
    }

    /// Fetch the first snapshot and build a store around it
    pub async fn bootstrap(source: &dyn SnapshotSource) -> Result<LiquityStore, SourceError> {
        let initial = source.fetch().await?;
        info!(
            "StorePoller: initial snapshot from {} (troves={}, price={})",
            source.describe(),
            initial.protocol.number_of_troves,
            initial.protocol.price
        );
        Ok(LiquityStore::new(initial))
    }

    /// Spawn the polling task
    ///
    /// Runs until `shutdown_flag` turns false or `stop` is called.
    pub fn start(
        &mut self,
        source: Arc<dyn SnapshotSource>,
        store: LiquityStore,
        shutdown_flag: Arc<AtomicBool>,
    ) {
        let interval = self.poll_interval;
        let failures = Arc::clone(&self.consecutive_failures);

        info!(
            "StorePoller started: source={}, interval={:?}",
            source.describe(),
            interval
        );

        let handle = tokio::spawn(async move {
            while shutdown_flag.load(Ordering::Acquire) {
                tokio::time::sleep(interval).await;

                if !shutdown_flag.load(Ordering::Acquire) {
                    break;
                }

                poll_once(source.as_ref(), &store, &failures).await;
            }
            info!("StorePoller: polling task stopped");
        });

        self.task_handle = Some(handle);
    }

    pub async fn stop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            let _ = handle.await;
            info!("StorePoller stopped");
        }
    }

    /// Failed polls since the last successful one
    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures.load(Ordering::Acquire)
    }

    pub fn is_stale(&self) -> bool {
        self.consecutive_failures() > 0
    }

    /// Shared counter for views that show a stale marker
    pub fn failure_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.consecutive_failures)
    }
}

/// One poll: publish when the snapshot changed, keep the old one on error.
/// Returns true when a new snapshot was published.
pub async fn poll_once(
    source: &dyn SnapshotSource,
    store: &LiquityStore,
    failures: &AtomicU64,
) -> bool {
    match source.fetch().await {
        Ok(state) => {
            let recovered = failures.swap(0, Ordering::AcqRel);
            if recovered > 0 {
                info!("StorePoller: source recovered after {} failed polls", recovered);
            }

            if *store.snapshot() == state {
                debug!("StorePoller: snapshot unchanged");
                return false;
            }
            let version = store.publish(state);
            debug!("StorePoller: published version {}", version);
            true
        }
        Err(e) => {
            let failed = failures.fetch_add(1, Ordering::AcqRel) + 1;
            warn!(
                "StorePoller: fetch from {} failed ({} in a row), keeping last snapshot: {}",
                source.describe(),
                failed,
                e
            );
            false
        }
    }
}

impl Default for StorePoller {
    fn default() -> Self {
        Self::new(Duration::from_secs(12))
    }
}
