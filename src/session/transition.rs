//! Delayed win transition
//!
//! Winning a group shows the fully-correct state for a short moment
//! before the view returns to the lobby. The delay is the only scheduled
//! operation in the engine: it is keyed by the session epoch so a firing
//! for a replaced or discarded session is ignored, and the task is
//! aborted on teardown.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// How long the solved board stays visible before returning to the lobby
pub const WIN_DISPLAY_DELAY: Duration = Duration::from_millis(1200);

/// One pending return-to-lobby timer
///
/// Scheduling replaces any previous timer. The receiver must check the
/// delivered epoch against the live session before acting on it.
#[derive(Debug, Default)]
pub struct WinScheduler {
    handle: Option<JoinHandle<()>>,
}

impl WinScheduler {
    pub fn new() -> Self {
        WinScheduler { handle: None }
    }

    /// Schedule a lobby return for the session identified by `epoch`
    pub fn schedule(&mut self, epoch: u64, delay: Duration, notify: UnboundedSender<u64>) {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may already be gone; that is a cancel, not an error
            let _ = notify.send(epoch);
        }));
    }

    /// Abort the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for WinScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
