//! Display helpers for engine result lines.

use std::path::{Path, PathBuf};

/// One selectable result row. `description` keeps whatever the engine
/// printed (tilde included when the display options ask for it); `resolved`
/// is the expanded form used for every filesystem operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub label: String,
    pub description: String,
    pub resolved: PathBuf,
}

impl PickerEntry {
    pub fn from_line(line: &str) -> Self {
        let resolved = expand_tilde(line);
        let label = resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| line.to_string());
        Self {
            label,
            description: line.to_string(),
            resolved,
        }
    }

    /// Entry for the one-shot nested pick: absolute path for opening, path
    /// relative to the listed root for display.
    pub fn from_listing(root: &Path, path: &Path) -> Self {
        let description = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| description.clone());
        Self {
            label,
            description,
            resolved: path.to_path_buf(),
        }
    }
}

/// Expand a leading `~` to the home directory. Paths without a tilde (and
/// paths on systems with no resolvable home) pass through unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
