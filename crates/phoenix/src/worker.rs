//! A dedicated thread owning one controller.
//!
//! Native calls block. Async hosts hand the controller to a
//! [`ControllerWorker`], which runs submitted closures one at a time on its
//! own OS thread and returns results over `tokio::sync::oneshot`.
//!
//! ```no_run
//! # async fn demo(library: std::sync::Arc<ctre_phoenix::PhoenixLibrary>) -> ctre_phoenix::Result<()> {
//! use ctre_phoenix::prelude::*;
//!
//! let talon = TalonSrx::new(&library, 1)?;
//! let worker = ControllerWorker::spawn("talon-1", talon)?;
//! let volts = worker.run(|talon| talon.get_bus_voltage()).await??;
//! # let _ = volts;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Sender};
use tokio::sync::oneshot;

use crate::error::{PhoenixError, Result};

type Job<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Owns a controller on a dedicated thread.
///
/// Jobs run in submission order. Dropping the worker (or calling
/// [`shutdown`](Self::shutdown)) lets queued jobs finish, then drops the
/// controller on the worker thread, which releases its native handle.
pub struct ControllerWorker<T> {
    name: String,
    jobs: Option<Sender<Job<T>>>,
    thread: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> ControllerWorker<T> {
    /// Move `controller` onto a new thread named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::Io`] if the thread cannot be spawned.
    pub fn spawn(name: impl Into<String>, controller: T) -> Result<Self> {
        let name = name.into();
        let (jobs_tx, jobs_rx) = channel::unbounded::<Job<T>>();

        let thread_name = name.clone();
        let thread = thread::Builder::new().name(name.clone()).spawn(move || {
            let mut controller = controller;
            let mut executed: u64 = 0;
            for job in jobs_rx.iter() {
                job(&mut controller);
                executed += 1;
            }
            tracing::debug!(worker = %thread_name, executed, "Controller worker stopping");
            drop(controller);
        })?;

        tracing::info!(worker = %name, "Controller worker started");

        Ok(Self {
            name,
            jobs: Some(jobs_tx),
            thread: Some(thread),
        })
    }

    /// Queue `f` and return the receiver for its result.
    fn submit<R, F>(&self, f: F) -> Result<oneshot::Receiver<R>>
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        R: Send + 'static,
    {
        let jobs = self.jobs.as_ref().ok_or(PhoenixError::WorkerStopped)?;
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job<T> = Box::new(move |controller| {
            // The caller may have stopped waiting.
            let _ = reply_tx.send(f(controller));
        });
        jobs.send(job).map_err(|_| {
            tracing::warn!(worker = %self.name, "Job submitted to a stopped worker");
            PhoenixError::WorkerStopped
        })?;
        Ok(reply_rx)
    }

    /// Run `f` on the worker thread and await its result.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::WorkerStopped`] if the thread has exited,
    /// including when an earlier job panicked.
    pub async fn run<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        R: Send + 'static,
    {
        let reply = self.submit(f)?;
        reply.await.map_err(|_| PhoenixError::WorkerStopped)
    }

    /// Run `f` on the worker thread, blocking the caller until it is done.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::BlockingInRuntime`] without queueing `f` when
    /// called from a thread driving an async runtime. Otherwise see
    /// [`run`](Self::run).
    pub fn run_blocking<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        R: Send + 'static,
    {
        if tokio::runtime::Handle::try_current().is_ok() {
            tracing::warn!(worker = %self.name, "run_blocking called inside an async runtime");
            return Err(PhoenixError::BlockingInRuntime);
        }
        let reply = self.submit(f)?;
        reply.blocking_recv().map_err(|_| PhoenixError::WorkerStopped)
    }

    /// Whether the worker thread is still running.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl<T> ControllerWorker<T> {
    /// Name of the worker thread.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop accepting jobs, wait for queued ones, and drop the controller.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::WorkerStopped`] if the thread panicked.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        // Closing the channel ends the job loop.
        self.jobs.take();
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        thread.join().map_err(|_| {
            tracing::error!(worker = %self.name, "Controller worker panicked");
            PhoenixError::WorkerStopped
        })?;
        tracing::debug!(worker = %self.name, "Controller worker stopped");
        Ok(())
    }
}

impl<T> Drop for ControllerWorker<T> {
    fn drop(&mut self) {
        // Already logged inside `stop`.
        let _ = self.stop();
    }
}

impl<T> fmt::Debug for ControllerWorker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerWorker")
            .field("name", &self.name)
            .field("stopped", &self.jobs.is_none())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_run_returns_result() -> Result<()> {
        let worker = ControllerWorker::spawn("counter", 0_u32)?;
        for _ in 0..3 {
            worker.run(|n| *n += 1).await?;
        }
        assert_eq!(worker.run(|n| *n).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_jobs_run_in_submission_order() -> Result<()> {
        let worker = ControllerWorker::spawn("order", Vec::new())?;
        let pending: Vec<_> = (0..50)
            .map(|i| worker.submit(move |log: &mut Vec<i32>| log.push(i)))
            .collect::<Result<_>>()?;
        for reply in pending {
            assert!(reply.await.is_ok());
        }
        let log = worker.run(|log| log.clone()).await?;
        assert_eq!(log, (0..50).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_drop_releases_controller_on_worker_thread() -> Result<()> {
        let drops = Arc::new(AtomicUsize::new(0));
        let worker = ControllerWorker::spawn("drop", DropCounter(Arc::clone(&drops)))?;
        worker.run_blocking(|_| ())?;
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        drop(worker);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn test_panicked_job_stops_worker() -> Result<()> {
        let worker = ControllerWorker::spawn("panic", 0_u32)?;
        let result = worker.run_blocking(|_| -> u32 { panic!("job failed") });
        assert!(matches!(result, Err(PhoenixError::WorkerStopped)));

        let result = worker.run_blocking(|n| *n);
        assert!(matches!(result, Err(PhoenixError::WorkerStopped)));
        assert!(matches!(worker.shutdown(), Err(PhoenixError::WorkerStopped)));
        Ok(())
    }

    #[tokio::test]
    async fn test_run_blocking_inside_runtime_is_rejected() -> Result<()> {
        let worker = ControllerWorker::spawn("blocking", 0_u32)?;
        let result = worker.run_blocking(|n| {
            *n += 1;
            *n
        });
        assert!(matches!(result, Err(PhoenixError::BlockingInRuntime)));
        // The rejected job was never queued.
        assert_eq!(worker.run(|n| *n).await?, 0);
        Ok(())
    }

    #[test]
    fn test_shutdown_is_clean() -> Result<()> {
        let worker = ControllerWorker::spawn("clean", ())?;
        assert_eq!(worker.name(), "clean");
        assert!(worker.is_running());
        worker.shutdown()
    }
}
