//! Cancellable delayed tasks: a token-based scheduler, a last-write-wins
//! debouncer built on it, and a sampling throttle.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Handle to a scheduled task, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

#[derive(Default)]
struct Pending {
    next: AtomicU64,
    tasks: Mutex<HashMap<TaskToken, JoinHandle<()>>>,
}

/// Runs futures after a delay on a tokio runtime; each run can be cancelled
/// by its token until it starts.
#[derive(Clone)]
pub struct Scheduler {
    handle: Handle,
    pending: Arc<Pending>,
}

impl Scheduler {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            pending: Arc::new(Pending::default()),
        }
    }

    /// Scheduler bound to the runtime of the calling task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> TaskToken
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = TaskToken(self.pending.next.fetch_add(1, Ordering::Relaxed));
        let pending = Arc::clone(&self.pending);

        // Holding the lock across spawn keeps the task from removing its
        // entry before it was inserted.
        let mut tasks = lock(&self.pending);
        let handle = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let still_pending = lock(&pending).remove(&token).is_some();
            if still_pending {
                task.await;
            }
        });
        tasks.insert(token, handle);
        token
    }

    /// Cancel a task that has not started yet. Returns `false` if it already
    /// ran, started, or was cancelled.
    pub fn cancel(&self, token: TaskToken) -> bool {
        match lock(&self.pending).remove(&token) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

fn lock(pending: &Pending) -> std::sync::MutexGuard<'_, HashMap<TaskToken, JoinHandle<()>>> {
    // A poisoned map only means a task panicked mid-bookkeeping; the map
    // itself is still consistent.
    pending
        .tasks
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Runs only the most recent call once no newer call arrived for `delay`.
#[derive(Clone)]
pub struct Debouncer {
    scheduler: Scheduler,
    delay: Duration,
    last: Arc<Mutex<Option<TaskToken>>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(scheduler: Scheduler, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            last: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending call with `task`.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = last.take() {
            self.scheduler.cancel(previous);
        }
        *last = Some(self.scheduler.schedule(self.delay, task));
    }

    /// Drop the pending call, if any. Returns whether one was cancelled.
    pub fn cancel(&self) -> bool {
        let previous = self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        previous.is_some_and(|token| self.scheduler.cancel(token))
    }
}

/// Lets at most one event through per `interval`; the rest are dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether an event arriving now should be handled.
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn scheduled_task_runs_after_delay() {
        let scheduler = Scheduler::current();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        scheduler.schedule(Duration::from_millis(50), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(49)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_runs() {
        let scheduler = Scheduler::current();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let token = scheduler.schedule(Duration::from_millis(50), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(scheduler.cancel(token));
        assert!(!scheduler.cancel(token));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_keeps_last_call() {
        let debouncer = Debouncer::new(Scheduler::current(), Duration::from_millis(300));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for word in ["g", "gi", "git"] {
            let seen = Arc::clone(&seen);
            debouncer.call(async move {
                seen.lock().unwrap().push(word);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["git"]);
    }

    #[test]
    fn throttle_samples_events() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(throttle.ready_at(start));
        assert!(!throttle.ready_at(start + Duration::from_millis(40)));
        assert!(!throttle.ready_at(start + Duration::from_millis(99)));
        assert!(throttle.ready_at(start + Duration::from_millis(100)));
        assert!(!throttle.ready_at(start + Duration::from_millis(150)));
    }
}
