/// Queue stop handle
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle that tells a [`ThreadQueue`](crate::queue::ThreadQueue) to refuse
/// new work.
///
/// Cloneable and shareable across threads; `stop()` is idempotent. Tasks
/// already queued still run when the queue is shut down.
#[derive(Clone, Debug)]
pub struct QueueStopHandle {
    stopped: Arc<AtomicBool>,
}

impl QueueStopHandle {
    pub fn new(stopped: Arc<AtomicBool>) -> Self {
        Self { stopped }
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// `false` once `stop()` has been called.
    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::Acquire)
    }
}
