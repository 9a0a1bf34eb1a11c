//! Mutex-guarded controller sharing.
//!
//! A [`Device`](crate::Device) is `Send` but not `Sync`. To drive one
//! controller from several threads, wrap it in a [`SharedController`]:
//! every access goes through [`SharedController::with`], which holds the
//! lock for the whole closure so native calls never overlap.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// A controller shared between threads behind a mutex.
pub struct SharedController<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SharedController<T> {
    /// Wrap `controller` for shared use.
    pub fn new(controller: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Run `f` with exclusive access, blocking until the lock is free.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Like [`with`](Self::with) but gives up after `timeout`.
    ///
    /// Returns `None` if the lock could not be taken in time.
    pub fn try_with_for<R>(&self, timeout: Duration, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.inner.try_lock_for(timeout)?;
        Some(f(&mut guard))
    }

    /// Number of handles sharing the controller.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Take the controller back if this is the last handle.
    ///
    /// Otherwise returns `self` unchanged.
    pub fn into_inner(self) -> std::result::Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for SharedController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(guard) => f.debug_tuple("SharedController").field(&*guard).finish(),
            None => f.write_str("SharedController(<locked>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_with_serializes_access() {
        let shared = SharedController::new(Vec::new());
        let workers: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        shared.with(|log: &mut Vec<(i32, i32)>| log.push((t, i)));
                    }
                })
            })
            .collect();
        for worker in workers {
            assert!(worker.join().is_ok());
        }

        let log = match shared.into_inner() {
            Ok(log) => log,
            Err(_) => panic!("all other handles were dropped"),
        };
        assert_eq!(log.len(), 400);
        for t in 0..4 {
            let order: Vec<_> = log.iter().filter(|(w, _)| *w == t).map(|(_, i)| *i).collect();
            assert_eq!(order, (0..100).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_into_inner_requires_last_handle() {
        let shared = SharedController::new(5);
        let other = shared.clone();
        assert_eq!(shared.handle_count(), 2);
        let shared = match shared.into_inner() {
            Ok(_) => panic!("a second handle is still alive"),
            Err(shared) => shared,
        };
        drop(other);
        assert_eq!(shared.into_inner().ok(), Some(5));
    }

    #[test]
    fn test_try_with_for_times_out_while_locked() {
        let shared = SharedController::new(0_u32);
        let contender = shared.clone();
        shared.with(|_| {
            let result = thread::spawn(move || {
                contender.try_with_for(Duration::from_millis(10), |value| *value)
            })
            .join();
            assert!(matches!(result, Ok(None)));
        });
        assert_eq!(shared.try_with_for(Duration::from_millis(10), |value| *value), Some(0));
    }
}
