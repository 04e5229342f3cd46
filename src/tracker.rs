use crate::dispatch::UpdateDispatcher;
use crate::engine::{Category, RankedStore};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::error;

/// Coalesces rapid active-item changes into one trailing update. A single
/// pending timer slot per instance: every call aborts the pending dispatch
/// and schedules a new one carrying the latest path, so only the newest
/// survives a burst.
pub struct DebouncedTracker<S: RankedStore + 'static> {
    dispatcher: UpdateDispatcher<S>,
    delay: Duration,
    weight: f64,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<S: RankedStore + 'static> DebouncedTracker<S> {
    pub fn new(dispatcher: UpdateDispatcher<S>, delay: Duration, weight: f64) -> Self {
        Self {
            dispatcher,
            delay,
            weight,
            pending: Mutex::new(None),
        }
    }

    /// Must be called from within a tokio runtime. Fires exactly once,
    /// `delay` after the last call, unless superseded by a newer call.
    pub fn track_active(&self, path: String) {
        let Ok(mut pending) = self.pending.lock() else {
            error!("pending timer slot poisoned, dropping active-item event");
            return;
        };
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let dispatcher = self.dispatcher.clone();
        let delay = self.delay;
        let weight = self.weight;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dispatcher.record_usage(&path, weight, Category::Files);
        }));
    }
}

impl<S: RankedStore + 'static> Drop for DebouncedTracker<S> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(handle) = pending.take()
        {
            handle.abort();
        }
    }
}
