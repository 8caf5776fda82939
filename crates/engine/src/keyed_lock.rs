//! Per-key mutual exclusion.
//!
//! Both the sequencer and the fiscal period gate need to serialize work per
//! string key (sequence code, period code) without serializing unrelated
//! keys against each other. This module provides that as one reusable
//! primitive instead of ad hoc lock maps in each service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// A registry of per-key mutexes.
///
/// `with` runs a closure while holding the mutex for the given key. Locks
/// are created on first use and kept for the lifetime of the registry; the
/// key space here (sequence and period codes) is small and bounded.
#[derive(Debug, Default)]
pub struct KeyedLock {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLock {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the mutex for `key`.
    ///
    /// Callers for distinct keys do not block each other beyond the brief
    /// registry lookup. Re-entrant use with the same key deadlocks, as with
    /// any mutex.
    pub fn with<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let handle = self.handle(key);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    fn handle(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::thread;

    #[test]
    fn test_runs_closure_and_returns_value() {
        let lock = KeyedLock::new();
        let result = lock.with("a", || 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_serializes_same_key() {
        let lock = Arc::new(KeyedLock::new());
        let counter = Arc::new(AtomicI64::new(0));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let lock = Arc::clone(&lock);
            let counter = Arc::clone(&counter);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    lock.with("shared", || {
                        // Read-modify-write that would lose updates without
                        // mutual exclusion.
                        let value = counter.load(Ordering::SeqCst);
                        counter.store(value + 1, Ordering::SeqCst);
                    });
                }
            }));
        }

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        assert_eq!(counter.load(Ordering::SeqCst), 8000);
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let lock = KeyedLock::new();
        let outer = lock.with("a", || lock.with("b", || "nested"));
        assert_eq!(outer, "nested");
    }
}
