// ABOUTME: Payload-less change notifications
// ABOUTME: Subscribers re-read the whole document; no delta is carried

use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 64;

/// Signals that tell open views "the document changed, re-read it"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Any part of the document was written
    DocumentChanged,
    /// The active workspace switched; every view must re-read
    ActiveCompanyChanged,
}

/// Broadcast bus for document change notifications
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DocumentEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.tx.subscribe()
    }

    /// Emit an event; dropped silently when nobody is listening
    pub fn emit(&self, event: DocumentEvent) {
        debug!("Emitting {:?}", event);
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
