//! Liquity Store
//!
//! Process-wide holder of the latest published snapshot. Readers get an
//! `Arc` to an immutable state; publishing swaps the `Arc` and notifies
//! subscribers after the lock is released.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

use crate::domain::LiquityStoreState;

type Callback = Arc<dyn Fn(&Arc<LiquityStoreState>) + Send + Sync>;

struct StoreInner {
    state: RwLock<Arc<LiquityStoreState>>,
    version: AtomicU64,
    subscribers: RwLock<Vec<(u64, Callback)>>,
    next_subscriber_id: AtomicU64,
}

/// Shared handle to the store; clones refer to the same state
#[derive(Clone)]
pub struct LiquityStore {
    inner: Arc<StoreInner>,
}

impl LiquityStore {
    /// Create a store holding `initial` as version 0
    pub fn new(initial: LiquityStoreState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial)),
                version: AtomicU64::new(0),
                subscribers: RwLock::new(Vec::new()),
                next_subscriber_id: AtomicU64::new(0),
            }),
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<LiquityStoreState> {
        Arc::clone(&self.inner.state.read())
    }

    /// Number of snapshots published since creation
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Run a selector against the latest snapshot
    pub fn select_current<T>(&self, selector: impl FnOnce(&LiquityStoreState) -> T) -> T {
        let state = self.snapshot();
        selector(&state)
    }

    /// Register a callback run with every newly published snapshot
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<LiquityStoreState>) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.write().push((id, Arc::new(callback)));
        debug!("Store: subscriber {} added", id);

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    /// Replace the current snapshot and notify subscribers
    pub fn publish(&self, state: LiquityStoreState) -> u64 {
        let state = Arc::new(state);
        let version = {
            let mut current = self.inner.state.write();
            *current = Arc::clone(&state);
            self.inner.version.fetch_add(1, Ordering::AcqRel) + 1
        };

        let callbacks: Vec<Callback> = self
            .inner
            .subscribers
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        debug!("Store: published version {} to {} subscribers", version, callbacks.len());
        for callback in callbacks {
            callback(&state);
        }
        version
    }
}

/// Keeps a store callback registered until dropped
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // removal happens in Drop
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.subscribers.write().retain(|(id, _)| *id != self.id);
            debug!("Store: subscriber {} removed", self.id);
        }
    }
}
