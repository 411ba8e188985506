//! Worker threads for archive calls

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use once_cell::sync::Lazy;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::error;

use crate::models::Outcome;

static GLOBAL_POOL: Lazy<Arc<WorkerPool>> = Lazy::new(|| {
    Arc::new(
        WorkerPool::new(WorkerPool::default_threads()).expect("failed to start archive worker pool"),
    )
});

/// Fixed-size pool of blocking worker threads.
///
/// Every submitted task runs to completion on one worker; there is no
/// ordering between tasks and no cancellation.
#[derive(Debug)]
pub struct WorkerPool {
    handle: Handle,
    runtime: Option<Runtime>,
}

impl WorkerPool {
    /// Pool owning `threads` worker threads
    pub fn new(threads: usize) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(threads.max(1))
            .thread_name("archive-worker")
            .enable_all()
            .build()?;
        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        })
    }

    /// Pool borrowing the blocking threads of an existing runtime
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            runtime: None,
        }
    }

    /// Shared process-wide pool sized to the available parallelism
    pub fn global() -> Arc<WorkerPool> {
        Arc::clone(&GLOBAL_POOL)
    }

    pub fn default_threads() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }

    /// Run `task` on a worker and return a handle to its outcome
    pub fn submit<R, F>(&self, task: F) -> Pending<R>
    where
        F: FnOnce() -> Outcome<R> + Send + 'static,
        R: Send + 'static,
    {
        Pending {
            handle: self.handle.spawn_blocking(task),
        }
    }

    /// Run `task` on a worker without waiting for it
    pub fn detach<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        drop(self.handle.spawn_blocking(task));
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Dropping a runtime blocks; this may run inside async code
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Handle to an outcome computed on a [`WorkerPool`].
///
/// Await it from async code or call [`Pending::wait`] from a plain thread.
/// A task that panicked or was dropped by a shut-down pool resolves to a
/// failed outcome.
#[derive(Debug)]
pub struct Pending<R> {
    handle: JoinHandle<Outcome<R>>,
}

impl<R: Default> Pending<R> {
    /// Block the current thread until the outcome is ready
    pub fn wait(self) -> Outcome<R> {
        futures::executor::block_on(self)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<R: Default> Future for Pending<R> {
    type Output = Outcome<R>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) => {
                error!("Archive task did not complete: {}", e);
                Poll::Ready(Outcome::failed())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_tasks_resolve_through_wait() {
        let pool = WorkerPool::new(2).unwrap();
        let pending = pool.submit(|| Outcome::new(true, 7u32));
        assert_eq!(pending.wait(), Outcome::new(true, 7));
    }

    #[test]
    fn panicking_task_resolves_to_failed_outcome() {
        let pool = WorkerPool::new(1).unwrap();
        let pending = pool.submit::<String, _>(|| panic!("worker blew up"));
        assert_eq!(pending.wait(), Outcome::new(false, String::new()));
    }

    #[tokio::test]
    async fn pool_on_existing_runtime_can_be_awaited() {
        let pool = WorkerPool::from_handle(Handle::current());
        let outcome = pool.submit(|| Outcome::new(true, vec![1u8, 2])).await;
        assert!(outcome.success());
        assert_eq!(outcome.into_result(), vec![1, 2]);
    }
}
