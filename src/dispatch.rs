use crate::engine::{Category, RankedStore};
use crate::path_filter::PathFilter;
use std::sync::Arc;
use tracing::debug;

/// Receipt for a fire-and-forget tracking update. Carries no payload and no
/// error accessor: tracking failures are swallowed by contract and callers
/// cannot observe them.
#[derive(Debug, Clone, Copy)]
pub struct BestEffort(());

impl BestEffort {
    pub(crate) fn done() -> Self {
        BestEffort(())
    }
}

/// Sends single weighted updates to the external store, at most one attempt
/// each. Failures are logged at debug level and otherwise dropped; this is
/// telemetry, not state the user ever waits on.
pub struct UpdateDispatcher<S: RankedStore + 'static> {
    store: Arc<S>,
    filter: Arc<PathFilter>,
}

impl<S: RankedStore + 'static> Clone for UpdateDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            filter: Arc::clone(&self.filter),
        }
    }
}

impl<S: RankedStore + 'static> UpdateDispatcher<S> {
    pub fn new(store: Arc<S>, filter: Arc<PathFilter>) -> Self {
        Self { store, filter }
    }

    /// Must be called from within a tokio runtime; the update runs as a
    /// detached task so event handlers never wait on the engine.
    pub fn record_usage(&self, path: &str, weight: f64, category: Category) -> BestEffort {
        if path.is_empty() {
            return BestEffort::done();
        }
        if category == Category::Files && !self.filter.is_trackable(path) {
            debug!(path, "path not trackable, update dropped");
            return BestEffort::done();
        }

        let store = Arc::clone(&self.store);
        let path = path.to_owned();
        tokio::spawn(async move {
            if let Err(err) = store.update(category, weight, &path).await {
                debug!(%err, path = %path, weight, "usage update failed");
            }
        });
        BestEffort::done()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QueryRequest;
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        updates: Mutex<Vec<(Category, f64, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl RankedStore for RecordingStore {
        async fn update(&self, category: Category, weight: f64, path: &str) -> Result<()> {
            self.updates
                .lock()
                .unwrap()
                .push((category, weight, path.to_string()));
            if self.fail {
                return Err(Error::EngineSpawn {
                    program: "missing-engine".into(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            Ok(())
        }

        async fn find(&self, _request: &QueryRequest) -> Result<String> {
            Ok(String::new())
        }
    }

    fn dispatcher(store: Arc<RecordingStore>) -> UpdateDispatcher<RecordingStore> {
        let filter = Arc::new(PathFilter::new(&["**/.git/**".to_string()]).unwrap());
        UpdateDispatcher::new(store, filter)
    }

    async fn drain() {
        // Let detached update tasks run to completion on the test runtime.
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn update_reaches_the_store() {
        let store = Arc::new(RecordingStore::default());
        dispatcher(Arc::clone(&store)).record_usage("/home/u/a.txt", 1.0, Category::Files);
        drain().await;

        let updates = store.updates.lock().unwrap();
        assert_eq!(
            updates.as_slice(),
            &[(Category::Files, 1.0, "/home/u/a.txt".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_path_is_a_noop() {
        let store = Arc::new(RecordingStore::default());
        dispatcher(Arc::clone(&store)).record_usage("", 1.0, Category::Files);
        drain().await;
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn filtered_file_paths_never_reach_the_store() {
        let store = Arc::new(RecordingStore::default());
        let dispatcher = dispatcher(Arc::clone(&store));
        dispatcher.record_usage("untitled:Untitled-1", 1.0, Category::Files);
        dispatcher.record_usage("/repo/.git/HEAD", 1.0, Category::Files);
        drain().await;
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn directory_updates_bypass_the_file_filter() {
        let store = Arc::new(RecordingStore::default());
        dispatcher(Arc::clone(&store)).record_usage("/repo/.git/hooks", 1.0, Category::Directories);
        drain().await;
        assert_eq!(store.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        dispatcher(Arc::clone(&store)).record_usage("/home/u/a.txt", 1.0, Category::Files);
        drain().await;
        // The attempt happened exactly once and nothing escaped.
        assert_eq!(store.updates.lock().unwrap().len(), 1);
    }
}
