//! One-shot delayed work that can be superseded or cancelled.

use std::future::Future;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// Holds at most one pending task. Scheduling again cancels the previous one;
/// dropping the holder cancels whatever is still pending. Once the delay has
/// elapsed the task body runs to completion.
#[derive(Default)]
pub struct DelayedTask {
    cancel_token: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay` unless cancelled or superseded first.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let fired = Arc::new(AtomicBool::new(false));
        let fired_clone = fired.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token_clone.cancelled() => {}
                _ = time::sleep(delay) => {
                    fired_clone.store(true, Ordering::SeqCst);
                    task.await;
                }
            }
        });

        self.cancel_token = Some(cancel_token);
        self.handle = Some(handle);
        self.fired = fired;
    }

    /// Returns whether a task was still waiting out its delay. A body that has
    /// already started is left to finish.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.handle = None;

        was_pending
    }

    /// True while the delay is still running.
    pub fn is_pending(&self) -> bool {
        match (&self.cancel_token, &self.handle) {
            (Some(token), Some(handle)) => {
                !token.is_cancelled()
                    && !self.fired.load(Ordering::SeqCst)
                    && !handle.is_finished()
            }
            _ => false,
        }
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut task = DelayedTask::new();
        task.schedule(Duration::from_millis(1000), counter_task(&fired));
        assert!(task.is_pending());

        time::sleep(Duration::from_millis(999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_supersedes_pending_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut task = DelayedTask::new();

        for _ in 0..5 {
            task.schedule(Duration::from_millis(1000), counter_task(&fired));
            time::sleep(Duration::from_millis(500)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_prevent_firing() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut task = DelayedTask::new();
        task.schedule(Duration::from_millis(100), counter_task(&fired));
        assert!(task.cancel());
        assert!(!task.cancel());

        {
            let mut dropped = DelayedTask::new();
            dropped.schedule(Duration::from_millis(100), counter_task(&fired));
        }

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn started_body_is_no_longer_pending() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let mut task = DelayedTask::new();
        task.schedule(Duration::from_millis(100), async move {
            time::sleep(Duration::from_millis(1000)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(200)).await;
        assert!(!task.is_pending());
        assert!(!task.cancel());

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
