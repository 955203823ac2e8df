/// Channel-backed worker threads
use crate::queue::stop_handle::QueueStopHandle;
use crate::queue::{Task, TaskQueue};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// Runs tasks on a fixed pool of background threads.
///
/// Tasks are pulled from a shared channel, so with one worker they run in
/// submission order and with several there is no ordering guarantee.
/// [`shutdown`](TaskQueue::shutdown) closes the channel and joins the
/// workers after they drain what was already queued. Dropping the queue
/// does the same.
pub struct ThreadQueue {
    sender: Mutex<Option<Sender<Task>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    stopped: Arc<AtomicBool>,
}

impl ThreadQueue {
    /// Spawn `workers` threads (at least one).
    pub fn new(workers: usize) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Task>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut handles = Vec::with_capacity(workers.max(1));
        for id in 0..workers.max(1) {
            let receiver = Arc::clone(&receiver);
            let handle = thread::Builder::new()
                .name(format!("db-query-logger-{id}"))
                .spawn(move || worker_loop(id, &receiver))?;
            handles.push(handle);
        }

        log::debug!("Started {} query log worker(s)", handles.len());

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(handles),
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn stop_handle(&self) -> QueueStopHandle {
        QueueStopHandle::new(Arc::clone(&self.stopped))
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::Acquire)
    }
}

fn worker_loop(id: usize, receiver: &Mutex<Receiver<Task>>) {
    loop {
        let next = receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv();
        let Ok(task) = next else {
            log::trace!("Query log worker {id} exiting");
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            log::error!("Query log task panicked on worker {id}");
        }
    }
}

impl TaskQueue for ThreadQueue {
    fn submit(&self, task: Task) {
        if !self.is_running() {
            log::warn!("Query log queue is stopped, dropping entry");
            return;
        }
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(sender) => {
                if sender.send(task).is_err() {
                    log::warn!("Query log workers are gone, dropping entry");
                }
            }
            None => log::warn!("Query log queue is shut down, dropping entry"),
        }
    }

    fn shutdown(&self) {
        self.stopped.store(true, Ordering::Release);

        // Closing the channel lets workers finish the backlog and exit.
        drop(
            self.sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );

        let handles: Vec<JoinHandle<()>> = self
            .workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for handle in handles {
            if let Err(e) = handle.join() {
                log::warn!("Query log worker panicked: {e:?}");
            }
        }
    }
}

impl Drop for ThreadQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ThreadQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadQueue")
            .field("running", &self.is_running())
            .finish()
    }
}
