//! End-to-end tracking-path tests: editor events in, weighted engine
//! updates out.

use async_trait::async_trait;
use frecency_bridge::{
    Category, DebouncedTracker, PathFilter, PathScheme, QueryRequest, RankedStore, Result,
    SaveReason, UpdateDispatcher, UsageObserver, WeightTable,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{Instant, sleep};

#[derive(Debug, Clone, PartialEq)]
struct Update {
    category: Category,
    weight: f64,
    path: String,
    at_ms: u64,
}

struct RecordingStore {
    started: Instant,
    updates: Mutex<Vec<Update>>,
}

impl RecordingStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Instant::now(),
            updates: Mutex::new(Vec::new()),
        })
    }

    fn updates(&self) -> Vec<Update> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl RankedStore for RecordingStore {
    async fn update(&self, category: Category, weight: f64, path: &str) -> Result<()> {
        self.updates.lock().unwrap().push(Update {
            category,
            weight,
            path: path.to_string(),
            at_ms: self.started.elapsed().as_millis() as u64,
        });
        Ok(())
    }

    async fn find(&self, _request: &QueryRequest) -> Result<String> {
        Ok(String::new())
    }
}

fn observer(
    store: Arc<RecordingStore>,
    excludes: &[&str],
    debounce_ms: u64,
) -> UsageObserver<RecordingStore> {
    let excludes: Vec<String> = excludes.iter().map(|g| g.to_string()).collect();
    let weights = WeightTable::default();
    let filter = Arc::new(PathFilter::new(&excludes).unwrap());
    let dispatcher = UpdateDispatcher::new(store, filter);
    let tracker = DebouncedTracker::new(
        dispatcher.clone(),
        Duration::from_millis(debounce_ms),
        weights
            .weight_for(frecency_bridge::EventKind::ActiveFocus)
            .unwrap(),
    );
    UsageObserver::new(dispatcher, tracker, weights)
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn open_then_autosave_dispatches_two_weighted_updates() {
    let store = RecordingStore::new();
    let observer = observer(Arc::clone(&store), &[], 500);

    observer.document_opened("/home/u/a.txt", PathScheme::File);
    settle().await;
    observer.document_will_save("/home/u/a.txt", PathScheme::File, SaveReason::Automatic);
    settle().await;

    let updates = store.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].category, Category::Files);
    assert_eq!(updates[0].weight, 1.0);
    assert_eq!(updates[0].path, "/home/u/a.txt");
    assert_eq!(updates[1].weight, 0.3);
    assert_eq!(updates[1].path, "/home/u/a.txt");
}

#[tokio::test]
async fn manual_save_uses_the_full_save_weight() {
    let store = RecordingStore::new();
    let observer = observer(Arc::clone(&store), &[], 500);

    observer.document_will_save("/home/u/a.txt", PathScheme::File, SaveReason::Manual);
    settle().await;

    assert_eq!(store.updates()[0].weight, 1.0);
}

#[tokio::test]
async fn virtual_schemes_and_colon_paths_never_reach_the_store() {
    let store = RecordingStore::new();
    let observer = observer(Arc::clone(&store), &[], 500);

    observer.document_opened("diff view", PathScheme::Virtual);
    observer.document_opened("untitled:Untitled-1", PathScheme::File);
    settle().await;

    assert!(store.updates().is_empty());
}

#[tokio::test]
async fn excluded_globs_never_reach_the_store() {
    let store = RecordingStore::new();
    let observer = observer(Arc::clone(&store), &["**/target/**"], 500);

    observer.document_opened("/repo/target/debug/build.log", PathScheme::File);
    observer.document_opened("/repo/src/main.rs", PathScheme::File);
    settle().await;

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].path, "/repo/src/main.rs");
}

#[tokio::test]
async fn workspace_folders_are_tracked_as_directories() {
    let store = RecordingStore::new();
    let observer = observer(Arc::clone(&store), &[], 500);

    observer.workspace_folder_added("/home/u/projects/app", PathScheme::File);
    settle().await;

    let updates = store.updates();
    assert_eq!(updates[0].category, Category::Directories);
    assert_eq!(updates[0].weight, 1.0);
}

#[tokio::test(start_paused = true)]
async fn rapid_tab_switching_collapses_to_one_trailing_update() {
    let store = RecordingStore::new();
    let observer = observer(Arc::clone(&store), &[], 500);

    observer.active_item_changed("/a", PathScheme::File);
    sleep(Duration::from_millis(100)).await;
    observer.active_item_changed("/b", PathScheme::File);
    sleep(Duration::from_millis(350)).await;
    observer.active_item_changed("/c", PathScheme::File);
    sleep(Duration::from_millis(700)).await;

    let updates = store.updates();
    assert_eq!(updates.len(), 1, "burst must coalesce to one update");
    assert_eq!(updates[0].path, "/c");
    assert_eq!(updates[0].weight, 0.2);
    assert_eq!(updates[0].at_ms, 950);
}
