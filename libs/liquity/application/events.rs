//! Trove view events
//!
//! Views never change view state themselves; they emit named events to the
//! coordinator that owns it.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TroveViewEvent {
    OpenTrovePressed,
}

impl TroveViewEvent {
    /// Wire name understood by the view-state coordinator
    pub fn name(&self) -> &'static str {
        match self {
            TroveViewEvent::OpenTrovePressed => "OPEN_TROVE_PRESSED",
        }
    }
}

impl fmt::Display for TroveViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fire-and-forget event sink
pub trait EventDispatcher: Send + Sync {
    fn dispatch_event(&self, event: TroveViewEvent);
}

/// Forwards events to a coordinator over a channel
#[derive(Clone)]
pub struct ChannelDispatcher {
    tx: Sender<TroveViewEvent>,
}

impl ChannelDispatcher {
    pub fn new(tx: Sender<TroveViewEvent>) -> Self {
        Self { tx }
    }

    /// Unbounded dispatcher paired with the coordinator's receiver
    pub fn unbounded() -> (Self, Receiver<TroveViewEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl EventDispatcher for ChannelDispatcher {
    fn dispatch_event(&self, event: TroveViewEvent) {
        match self.tx.try_send(event) {
            Ok(()) => debug!("Dispatched {}", event),
            Err(TrySendError::Full(_)) => warn!("Event queue full, dropping {}", event),
            Err(TrySendError::Disconnected(_)) => {
                warn!("View-state coordinator gone, dropping {}", event)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        assert_eq!(TroveViewEvent::OpenTrovePressed.name(), "OPEN_TROVE_PRESSED");
        assert_eq!(TroveViewEvent::OpenTrovePressed.to_string(), "OPEN_TROVE_PRESSED");
    }

    #[test]
    fn test_channel_dispatcher_delivers() {
        let (dispatcher, rx) = ChannelDispatcher::unbounded();
        dispatcher.dispatch_event(TroveViewEvent::OpenTrovePressed);
        assert_eq!(rx.try_recv().unwrap(), TroveViewEvent::OpenTrovePressed);
    }

    #[test]
    fn test_dispatch_after_receiver_dropped_does_not_panic() {
        let (dispatcher, rx) = ChannelDispatcher::unbounded();
        drop(rx);
        dispatcher.dispatch_event(TroveViewEvent::OpenTrovePressed);
    }
}
