//! Cancellable delayed-task handle.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A unit of work spawned onto the runtime that starts after a fixed delay.
///
/// Dropping the handle detaches the task; only `cancel` stops it.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
    due: Instant,
}

impl DelayedTask {
    pub fn schedule<F>(delay: Duration, work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let due = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(due).await;
            work.await;
        });
        Self { handle, due }
    }

    /// Aborts the task. A task that already finished is unaffected.
    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = DelayedTask::schedule(Duration::from_millis(3000), async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert!(!task.is_finished());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = DelayedTask::schedule(Duration::from_millis(100), async move {
            flag.store(true, Ordering::SeqCst);
        });
        let due = task.due();
        task.cancel();

        tokio::time::sleep_until(due + Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_detaches() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        drop(DelayedTask::schedule(Duration::from_millis(10), async move {
            flag.store(true, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(fired.load(Ordering::SeqCst));
    }
}
