use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// The slice of the host editor this crate needs after a selection: opening
/// a document and surfacing a warning. Everything else stays on the editor's
/// side of the seam.
#[async_trait]
pub trait EditorShell: Send {
    /// Open `path` in the editor. `new_tab` picks a persistent tab over the
    /// editor's preview behavior.
    async fn open_file(&mut self, path: &Path, new_tab: bool) -> Result<()>;

    /// A persistent, user-visible warning (missing engine, broken
    /// selection). Must not block.
    fn show_warning(&mut self, message: &str);
}
