//! Deferred execution of log writes.
//!
//! The listener never writes on the caller's path; it submits a [`Task`] to
//! a [`TaskQueue`]. Submission must not fail past the caller, so the
//! interface has no return value. A closed queue drops the task with a
//! warning.

mod stop_handle;
mod sync_queue;
mod thread_queue;

pub use stop_handle::QueueStopHandle;
pub use sync_queue::SyncQueue;
pub use thread_queue::ThreadQueue;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Submit-and-forget task execution.
pub trait TaskQueue: Send + Sync {
    fn submit(&self, task: Task);

    /// Stop accepting work and wait for queued tasks. Idempotent.
    fn shutdown(&self) {}
}
