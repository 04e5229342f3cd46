//! The two invocable actions exposed to the editor shell, plus the
//! selection continuations behind them.

use crate::engine::{Category, RankedStore};
use crate::listing;
use crate::path_display::PickerEntry;
use crate::query::QueryDispatcher;
use crate::session::{PickerUi, SearchSession};
use crate::shell::EditorShell;
use std::sync::Arc;
use tracing::{info, warn};

/// Knobs the continuations need beyond the query snapshot.
#[derive(Debug, Clone)]
pub struct ActionOptions {
    pub open_in_new_tab: bool,
    pub nested_pick_exclude: String,
    pub nested_pick_cap: usize,
}

/// Live file search: pick from the ranked store, then open the selection.
/// Returns once the user has selected or dismissed.
pub async fn interactive_file_search<S, U, E>(
    dispatcher: &Arc<QueryDispatcher<S>>,
    options: &ActionOptions,
    ui: &mut U,
    shell: &mut E,
) where
    S: RankedStore + 'static,
    U: PickerUi,
    E: EditorShell,
{
    let session = SearchSession::new(Arc::clone(dispatcher), Category::Files);
    let Some(entry) = session.run(ui).await else {
        return;
    };
    open_selection(shell, &entry, options.open_in_new_tab).await;
}

/// Live directory search with a drill-in continuation: the selected
/// directory is listed once (static, capped, glob-excluded) and the nested
/// pick opens the chosen file.
pub async fn interactive_directory_search<S, U, E>(
    dispatcher: &Arc<QueryDispatcher<S>>,
    options: &ActionOptions,
    ui: &mut U,
    shell: &mut E,
) where
    S: RankedStore + 'static,
    U: PickerUi,
    E: EditorShell,
{
    let session = SearchSession::new(Arc::clone(dispatcher), Category::Directories);
    let Some(entry) = session.run(ui).await else {
        return;
    };

    let files = match listing::list_directory(
        &entry.resolved,
        &options.nested_pick_exclude,
        options.nested_pick_cap,
    ) {
        Ok(files) => files,
        Err(err) => {
            warn!(%err, directory = %entry.resolved.display(), "nested listing failed");
            shell.show_warning(&format!("Cannot list {}: {err}", entry.description));
            return;
        }
    };
    if files.is_empty() {
        info!(directory = %entry.resolved.display(), "nested pick skipped, no files");
        return;
    }

    let Some(index) = ui.pick_static(&files).await else {
        return;
    };
    let Some(chosen) = files.get(index) else {
        return;
    };
    open_selection(shell, chosen, options.open_in_new_tab).await;
}

/// The session has already closed when this runs, so a broken selection is
/// surfaced once and does not reopen anything.
async fn open_selection<E: EditorShell>(shell: &mut E, entry: &PickerEntry, new_tab: bool) {
    if let Err(err) = shell.open_file(&entry.resolved, new_tab).await {
        warn!(%err, path = %entry.resolved.display(), "failed to open selection");
        shell.show_warning(&format!("Cannot open {}: {err}", entry.description));
    }
}
