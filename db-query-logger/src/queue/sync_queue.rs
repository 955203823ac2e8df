/// Inline task execution
use crate::queue::{Task, TaskQueue};
use std::panic::{self, AssertUnwindSafe};

/// Runs each task immediately on the submitting thread.
///
/// Equivalent to a "sync" queue connection; useful for tests and for hosts
/// that already run query callbacks off the request path. A panicking task
/// is logged and does not unwind into the submitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncQueue;

impl TaskQueue for SyncQueue {
    fn submit(&self, task: Task) {
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            log::error!("Query log task panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_runs_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        SyncQueue.submit(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_task_does_not_reach_submitter() {
        let counter = Arc::new(AtomicUsize::new(0));

        SyncQueue.submit(Box::new(|| {
            panic!("formatter exploded");
        }));
        let c = Arc::clone(&counter);
        SyncQueue.submit(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
