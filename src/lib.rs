//! frecency-bridge - editor-side bridge to an external frecency-ranked path store.
//!
//! Converts editor usage events (opens, saves, active-tab switches,
//! workspace changes) into debounced, weighted, filtered update calls
//! against the external store, and drives an interactive incremental search
//! whose ranked results come entirely from that store: nothing here sorts,
//! filters, or deduplicates what the engine returns.

pub mod actions;
mod bridge;
pub mod config;
pub mod dispatch;
pub mod engine;
mod error;
pub mod events;
pub mod listing;
pub mod log;
pub mod path_display;
pub mod path_filter;
pub mod query;
pub mod session;
pub mod shell;
pub mod tracker;
pub mod weights;

// Re-export main types for convenience
pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use dispatch::{BestEffort, UpdateDispatcher};
pub use engine::{Category, CaseSensitivity, EngineClient, QueryRequest, RankedStore, SyntaxMode};
pub use error::{Error, Result};
pub use events::{EventKind, PathScheme, SaveReason, UsageEvent, UsageObserver};
pub use path_display::{PickerEntry, expand_tilde};
pub use path_filter::PathFilter;
pub use query::{QueryDispatcher, QueryOptions};
pub use session::{PickerUi, SearchSession, UiEvent};
pub use shell::EditorShell;
pub use tracker::DebouncedTracker;
pub use weights::WeightTable;
