//! Keyed, cancellable one-shot timers
//!
//! Each key has at most one outstanding task. Scheduling again for the same
//! key aborts the previous task, so exactly one deferred action can fire per
//! key. Everything still pending is aborted when the owner is dropped.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Outstanding deferred actions, at most one per key
///
/// Must be used from inside a Tokio runtime: `schedule` spawns a task.
pub struct ResetTimers<K> {
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K: Eq + Hash> ResetTimers<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Run `action` after `delay`, replacing any task already queued for `key`
    pub fn schedule<F>(&mut self, key: K, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Forget tasks that already ran so the map doesn't grow per click
        self.pending.retain(|_, handle| !handle.is_finished());

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });

        if let Some(previous) = self.pending.insert(key, handle) {
            previous.abort();
        }
    }

    /// Abort the task queued for `key`
    ///
    /// Returns true if a task was still waiting to fire.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(handle) => {
                let was_live = !handle.is_finished();
                handle.abort();
                was_live
            }
            None => false,
        }
    }

    /// Abort every queued task
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    /// Number of tasks that have not fired yet
    pub fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl<K: Eq + Hash> Default for ResetTimers<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for ResetTimers<K> {
    fn drop(&mut self) {
        // Dropping a JoinHandle only detaches the task
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(hits: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static {
        let hits = hits.clone();
        move || {
            hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_fires_after_delay() {
        let hits = counter();
        let mut timers = ResetTimers::new();
        timers.schedule("a", Duration::from_millis(2000), bump(&hits));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(timers.pending(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_previous_task() {
        let first = counter();
        let second = counter();
        let mut timers = ResetTimers::new();

        timers.schedule("a", Duration::from_millis(2000), bump(&first));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        timers.schedule("a", Duration::from_millis(2000), bump(&second));

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let a = counter();
        let b = counter();
        let mut timers = ResetTimers::new();

        timers.schedule("a", Duration::from_millis(100), bump(&a));
        timers.schedule("b", Duration::from_millis(100), bump(&b));
        assert!(timers.cancel(&"a"));
        assert!(!timers.cancel(&"missing"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_tasks() {
        let hits = counter();
        {
            let mut timers = ResetTimers::new();
            timers.schedule(1usize, Duration::from_millis(500), bump(&hits));
            timers.schedule(2usize, Duration::from_millis(500), bump(&hits));
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let hits = counter();
        let mut timers = ResetTimers::new();
        timers.schedule("a", Duration::from_millis(10), bump(&hits));
        timers.schedule("b", Duration::from_millis(10), bump(&hits));
        timers.cancel_all();
        assert_eq!(timers.pending(), 0);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
