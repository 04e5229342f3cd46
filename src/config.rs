//! Activation-scoped configuration snapshot.
//!
//! Loaded once per activation and handed to each component at construction;
//! nothing in this crate reads configuration ad hoc mid-operation. A
//! configuration change means rebuilding the bridge.

use crate::engine::{CaseSensitivity, SyntaxMode};
use crate::error::{Error, Result};
use crate::weights::WeightTable;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BridgeConfig {
    /// Binary of the external ranking engine.
    pub engine_program: PathBuf,
    /// Maximum results requested per query; 0 disables the cap.
    pub result_cap: u32,
    pub syntax_mode: SyntaxMode,
    pub case_sensitivity: CaseSensitivity,
    /// Ask the engine to print home paths in `~` form.
    pub home_tilde: bool,
    pub relative_paths: bool,
    pub debounce_delay_ms: u64,
    pub weights: WeightTable,
    pub exclude_globs: Vec<String>,
    /// Open selections in a new tab instead of a preview.
    pub open_in_new_tab: bool,
    /// Exclusion glob for the one-shot nested directory pick.
    pub nested_pick_exclude: String,
    /// Maximum item count for the nested directory pick.
    pub nested_pick_cap: usize,
    pub log_level: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            engine_program: PathBuf::from("frecent"),
            result_cap: 100,
            syntax_mode: SyntaxMode::default(),
            case_sensitivity: CaseSensitivity::default(),
            home_tilde: true,
            relative_paths: false,
            debounce_delay_ms: 500,
            weights: WeightTable::default(),
            exclude_globs: vec!["**/.git/**".to_string()],
            open_in_new_tab: false,
            nested_pick_exclude: "**/node_modules/**".to_string(),
            nested_pick_cap: 512,
            log_level: None,
        }
    }
}

impl BridgeConfig {
    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Editor hosts hand settings over as JSON.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn effective_result_cap(&self) -> Option<u32> {
        (self.result_cap > 0).then_some(self.result_cap)
    }
}
