use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Cooperative cancellation shared between the UI thread and workers.
///
/// The signal is a zero-capacity channel whose only sender is dropped on
/// cancel, so every clone observes it as a disconnection. That makes the
/// signal usable inside `crossbeam::select!` next to data channels.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    signal: Receiver<()>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (trigger, signal) = channel::bounded(0);
        Self {
            trigger: Arc::new(Mutex::new(Some(trigger))),
            signal,
        }
    }

    /// Fire the token. Idempotent.
    pub fn cancel(&self) {
        let mut trigger = self.trigger.lock().unwrap_or_else(PoisonError::into_inner);
        trigger.take();
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.signal.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Receiver that becomes ready (disconnected) once the token fires.
    pub fn signal(&self) -> &Receiver<()> {
        &self.signal
    }

    /// Sleep for up to `timeout`, waking early on cancellation.
    /// Returns `true` if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        matches!(
            self.signal.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected)
        )
    }
}
