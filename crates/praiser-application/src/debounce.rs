//! Cancellable debounce handle.
//!
//! A `DebounceSlot` holds at most one pending scheduled task. Scheduling
//! a replacement cancels the previous task, so whatever finally runs
//! reflects only the latest state, never an interleaving of two edits.
//! The service owns one slot per write class (chat save, settings save).

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// An explicit, cancellable scheduled-task handle.
///
/// Must be used from within a Tokio runtime; tasks are spawned onto the
/// ambient runtime.
pub struct DebounceSlot {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebounceSlot {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    /// Schedules `task` to run after `delay`, replacing (and cancelling)
    /// any task already pending in this slot.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().expect("debounce slot mutex poisoned");
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self
            .pending
            .lock()
            .expect("debounce slot mutex poisoned")
            .take()
        {
            handle.abort();
        }
    }
}

impl Default for DebounceSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_task_runs_after_delay() {
        let slot = DebounceSlot::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&counter);
        slot.schedule(Duration::from_millis(20), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_replacement_cancels_previous_task() {
        let slot = DebounceSlot::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let c = Arc::clone(&counter);
            slot.schedule(Duration::from_millis(30), async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        // Only the last scheduled task survived.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_prevents_the_task() {
        let slot = DebounceSlot::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&counter);
        slot.schedule(Duration::from_millis(20), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        slot.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        // Cancelling an empty slot is fine.
        slot.cancel();
    }
}
