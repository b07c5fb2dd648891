// ABOUTME: Debounced auto-save with cancel-and-reschedule semantics
// ABOUTME: Rapid successive edits collapse into a single whole-document write

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error};

use taskflow_core::AppDocument;

use crate::blob::DocumentStore;
use crate::StorageResult;

/// Default idle window before a scheduled document is flushed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Save-in-flight indicator: pending vs committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// No save has been scheduled yet
    Idle,
    /// Edits are held and will be flushed after the idle window
    Pending,
    /// The last scheduled document reached disk
    Saved,
}

/// Debounces whole-document saves.
///
/// `schedule` replaces any not-yet-flushed document and restarts the timer
/// (cancel-and-reschedule, not queueing); `flush` writes immediately.
pub struct DebouncedSaver {
    store: Arc<DocumentStore>,
    delay: Duration,
    pending: Arc<Mutex<Option<AppDocument>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    state: Arc<watch::Sender<SaveState>>,
}

impl DebouncedSaver {
    pub fn new(store: Arc<DocumentStore>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SaveState::Idle);
        Self {
            store,
            delay,
            pending: Arc::new(Mutex::new(None)),
            timer: Mutex::new(None),
            state: Arc::new(state),
        }
    }

    pub fn with_default_delay(store: Arc<DocumentStore>) -> Self {
        Self::new(store, DEFAULT_DEBOUNCE)
    }

    /// Observe pending/committed transitions
    pub fn state(&self) -> watch::Receiver<SaveState> {
        self.state.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        *self.state.borrow() == SaveState::Pending
    }

    /// Hold `doc` for saving after the idle window. A prior scheduled save
    /// that has not fired yet is cancelled and replaced.
    pub fn schedule(&self, doc: AppDocument) {
        *self.pending.lock().expect("pending lock poisoned") = Some(doc);
        let _ = self.state.send_replace(SaveState::Pending);

        let mut timer = self.timer.lock().expect("timer lock poisoned");
        if let Some(handle) = timer.take() {
            debug!("Rescheduling debounced save");
            handle.abort();
        }

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);
        let state = Arc::clone(&self.state);
        let delay = self.delay;
        *timer = Some(tokio::spawn(async move {
            sleep(delay).await;
            // The document stays in `pending` until the write commits, so a
            // flush that interrupts this task mid-save still finds it and
            // persists it itself.
            let doc = pending.lock().expect("pending lock poisoned").clone();
            if let Some(doc) = doc {
                match store.save(&doc).await {
                    Ok(()) => {
                        let mut guard = pending.lock().expect("pending lock poisoned");
                        // A newer schedule may have replaced the document
                        // while this save was in flight; leave it for the
                        // newer timer.
                        if guard.as_ref() == Some(&doc) {
                            *guard = None;
                            let _ = state.send_replace(SaveState::Saved);
                        }
                    }
                    Err(e) => error!("Debounced save failed: {}", e),
                }
            }
        }));
    }

    /// Write any held document immediately, cancelling the timer
    pub async fn flush(&self) -> StorageResult<()> {
        if let Some(handle) = self.timer.lock().expect("timer lock poisoned").take() {
            handle.abort();
        }
        let doc = self.pending.lock().expect("pending lock poisoned").take();
        if let Some(doc) = doc {
            self.store.save(&doc).await?;
            let _ = self.state.send_replace(SaveState::Saved);
        }
        Ok(())
    }
}
