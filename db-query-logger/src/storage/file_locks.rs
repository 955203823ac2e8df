/// In-process mutual exclusion keyed by destination file
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

static SHARED: OnceLock<Arc<FileLocks>> = OnceLock::new();

/// Serializes read-modify-write cycles that target the same file.
///
/// Entries are dropped once nobody holds or waits on them, so generators
/// that produce a fresh name per record do not grow the map.
#[derive(Debug, Default)]
pub struct FileLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FileLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance every logger built by
    /// [`QueryLogger`](crate::QueryLogger) locks through.
    pub fn shared() -> Arc<FileLocks> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(FileLocks::new())))
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` while holding the lock for `key`.
    pub fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let lock = Arc::clone(self.map().entry(key.to_string()).or_default());

        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        let mut map = self.map();
        // One reference in the map, one here.
        if Arc::strong_count(&lock) == 2 {
            map.remove(key);
        }
        result
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> usize {
        self.map().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_same_key_is_serialized() {
        let locks = Arc::new(FileLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    locks.with_lock("/srv/logs/a.json", || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_is_one_instance() {
        assert!(Arc::ptr_eq(&FileLocks::shared(), &FileLocks::shared()));
    }

    #[test]
    fn test_entries_are_released() {
        let locks = FileLocks::new();
        let value = locks.with_lock("k", || 7);
        assert_eq!(value, 7);
        assert_eq!(locks.tracked(), 0);
    }
}
