//! Graceful stop signal shared by the HTTP server, the metrics listener and
//! the binary's Ctrl+C handler.

use tokio::sync::broadcast;

/// One-shot stop notification.
///
/// Clones share the same channel; a receiver obtained from any clone sees
/// a trigger from any other.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once `trigger` is called. Subscribe before
    /// serving so an early trigger is not missed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify every current receiver. A no-op when nobody is listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
