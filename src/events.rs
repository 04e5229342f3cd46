//! Editor usage events and the observation boundary that routes them into
//! tracking updates.

use crate::dispatch::UpdateDispatcher;
use crate::engine::{Category, RankedStore};
use crate::tracker::DebouncedTracker;
use crate::weights::WeightTable;
use tracing::{debug, error};

/// What the editor observed the user doing with a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Open,
    ManualSave,
    AutoSave,
    ActiveFocus,
    DirectoryVisit,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Open,
        EventKind::ManualSave,
        EventKind::AutoSave,
        EventKind::ActiveFocus,
        EventKind::DirectoryVisit,
    ];
}

/// Origin of a path as reported by the editor. Only real files are tracked;
/// everything else (scratch buffers, diff views, remote schemes) is dropped
/// at the observation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScheme {
    File,
    Virtual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    Manual,
    Automatic,
}

/// One observed interaction. Ephemeral: produced by the editor event source
/// and consumed immediately or via the debounced tracker.
#[derive(Debug, Clone)]
pub struct UsageEvent {
    pub path: String,
    pub kind: EventKind,
    pub scheme: PathScheme,
}

/// Entry point for all editor events. Applies the scheme check, resolves the
/// configured weight, and forwards to the dispatcher (or, for active-focus
/// churn, the debounced tracker).
pub struct UsageObserver<S: RankedStore + 'static> {
    dispatcher: UpdateDispatcher<S>,
    tracker: DebouncedTracker<S>,
    weights: WeightTable,
}

impl<S: RankedStore + 'static> UsageObserver<S> {
    pub fn new(
        dispatcher: UpdateDispatcher<S>,
        tracker: DebouncedTracker<S>,
        weights: WeightTable,
    ) -> Self {
        Self {
            dispatcher,
            tracker,
            weights,
        }
    }

    pub fn observe(&self, event: UsageEvent) {
        if event.scheme != PathScheme::File {
            debug!(path = %event.path, kind = ?event.kind, "skipping non-file scheme");
            return;
        }

        match event.kind {
            EventKind::ActiveFocus => self.tracker.track_active(event.path),
            EventKind::DirectoryVisit => {
                self.record(&event.path, EventKind::DirectoryVisit, Category::Directories);
            }
            kind => self.record(&event.path, kind, Category::Files),
        }
    }

    pub fn document_opened(&self, path: impl Into<String>, scheme: PathScheme) {
        self.observe(UsageEvent {
            path: path.into(),
            kind: EventKind::Open,
            scheme,
        });
    }

    pub fn document_will_save(
        &self,
        path: impl Into<String>,
        scheme: PathScheme,
        reason: SaveReason,
    ) {
        let kind = match reason {
            SaveReason::Manual => EventKind::ManualSave,
            SaveReason::Automatic => EventKind::AutoSave,
        };
        self.observe(UsageEvent {
            path: path.into(),
            kind,
            scheme,
        });
    }

    pub fn active_item_changed(&self, path: impl Into<String>, scheme: PathScheme) {
        self.observe(UsageEvent {
            path: path.into(),
            kind: EventKind::ActiveFocus,
            scheme,
        });
    }

    pub fn workspace_folder_added(&self, path: impl Into<String>, scheme: PathScheme) {
        self.observe(UsageEvent {
            path: path.into(),
            kind: EventKind::DirectoryVisit,
            scheme,
        });
    }

    fn record(&self, path: &str, kind: EventKind, category: Category) {
        // The weight table is validated at activation, so a miss here means
        // the table was built without validate(). Loudly refuse rather than
        // tracking at an implicit weight.
        let weight = match self.weights.weight_for(kind) {
            Ok(weight) => weight,
            Err(err) => {
                error!(%err, path, ?kind, "dropping usage event");
                return;
            }
        };
        self.dispatcher.record_usage(path, weight, category);
    }
}
