//! Infrastructure Layer
//!
//! Store, snapshot sources, polling and process plumbing.
//! Views never reach in here; they only receive snapshots from the store.

pub mod config;
pub mod heartbeat;
pub mod logging;
pub mod poller;
pub mod shutdown;
pub mod source;
pub mod store;

pub use config::{ConfigError, DashboardConfig, SourceKind};
pub use heartbeat::Heartbeat;
pub use logging::init_tracing;
pub use poller::StorePoller;
pub use shutdown::ShutdownManager;
pub use source::{FileSnapshotSource, HttpSnapshotSource, SnapshotSource, SourceError};
pub use store::{LiquityStore, Subscription};

use std::sync::Arc;

/// Build the snapshot source described by the configuration
pub fn build_source(config: &config::SourceConfig) -> Result<Arc<dyn SnapshotSource>, SourceError> {
    let source: Arc<dyn SnapshotSource> = match &config.kind {
        SourceKind::File { path } => Arc::new(FileSnapshotSource::new(path.clone())?),
        SourceKind::Http { url } => {
            Arc::new(HttpSnapshotSource::new(url.clone(), config.request_timeout())?)
        }
    };
    Ok(source)
}
