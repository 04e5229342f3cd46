//! Interactive incremental-search session.
//!
//! One session per opened widget. Every keystroke issues a fresh query
//! under a new generation number; responses race freely and are applied
//! only if their generation is still the newest issued. That single rule is
//! the crate's concurrency invariant: an old, slow response can never
//! overwrite a newer one that already arrived, regardless of arrival order.

use crate::engine::{Category, RankedStore};
use crate::path_display::PickerEntry;
use crate::query::QueryDispatcher;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// What the widget reports back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryChanged(String),
    /// Index into the currently rendered entries.
    Accepted(usize),
    Dismissed,
}

/// The interactive list-input widget, as the session sees it. The widget
/// must not filter or sort on its own: rendered order is the ranked order.
#[async_trait]
pub trait PickerUi: Send {
    fn set_placeholder(&mut self, text: &str);
    fn set_busy(&mut self, busy: bool);
    fn render(&mut self, entries: &[PickerEntry]);

    /// Next user interaction. Must be cancel-safe (typically backed by a
    /// channel): the session polls this concurrently with query responses.
    async fn next_event(&mut self) -> Option<UiEvent>;

    fn close(&mut self);

    /// One-shot static pick used by the nested directory drill. No live
    /// querying; the widget's own filtering may apply here.
    async fn pick_static(&mut self, entries: &[PickerEntry]) -> Option<usize>;
}

pub struct SearchSession<S: RankedStore + 'static> {
    dispatcher: Arc<QueryDispatcher<S>>,
    category: Category,
}

impl<S: RankedStore + 'static> SearchSession<S> {
    pub fn new(dispatcher: Arc<QueryDispatcher<S>>, category: Category) -> Self {
        Self {
            dispatcher,
            category,
        }
    }

    /// Drive the widget until the user accepts or dismisses. Returns the
    /// accepted entry, if any; the widget is closed either way. In-flight
    /// responses for superseded generations are discarded on arrival, and
    /// anything arriving after close is dropped with the channel.
    pub async fn run<U: PickerUi>(&self, ui: &mut U) -> Option<PickerEntry> {
        let (response_tx, mut response_rx) = mpsc::unbounded_channel::<(u64, Vec<String>)>();
        let mut generation: u64 = 0;
        let mut entries: Vec<PickerEntry> = Vec::new();

        ui.set_placeholder(match self.category {
            Category::Files => "Search tracked files",
            Category::Directories => "Search tracked directories",
        });
        ui.set_busy(true);
        self.issue(generation, String::new(), &response_tx);

        let selected = loop {
            tokio::select! {
                Some((response_generation, lines)) = response_rx.recv() => {
                    if response_generation != generation {
                        debug!(
                            response_generation,
                            current = generation,
                            "discarding stale query response"
                        );
                        continue;
                    }
                    entries = lines.iter().map(|line| PickerEntry::from_line(line)).collect();
                    ui.set_busy(false);
                    ui.render(&entries);
                }
                event = ui.next_event() => match event {
                    Some(UiEvent::QueryChanged(text)) => {
                        generation += 1;
                        ui.set_busy(true);
                        self.issue(generation, text, &response_tx);
                    }
                    Some(UiEvent::Accepted(index)) => break entries.get(index).cloned(),
                    Some(UiEvent::Dismissed) | None => break None,
                }
            }
        };

        ui.close();
        selected
    }

    fn issue(&self, generation: u64, text: String, response_tx: &mpsc::UnboundedSender<(u64, Vec<String>)>) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let category = self.category;
        let response_tx = response_tx.clone();
        tokio::spawn(async move {
            let lines = dispatcher.query(category, &text).await;
            // The session may have closed while this query was in flight.
            let _ = response_tx.send((generation, lines));
        });
    }
}
