use crate::config::BridgeConfig;
use crate::engine::{Category, CaseSensitivity, QueryRequest, RankedStore, SyntaxMode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::warn;

// CSI sequences (colors included); engines are often configured to colorize
// even when stdout is not a tty.
static ANSI_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static pattern compiles"));

/// Query-side snapshot of the configuration, fixed for the activation.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub result_cap: Option<u32>,
    pub syntax_mode: SyntaxMode,
    pub case_sensitivity: CaseSensitivity,
    pub home_tilde: bool,
    pub relative_paths: bool,
}

impl QueryOptions {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            result_cap: config.effective_result_cap(),
            syntax_mode: config.syntax_mode,
            case_sensitivity: config.case_sensitivity,
            home_tilde: config.home_tilde,
            relative_paths: config.relative_paths,
        }
    }
}

/// Builds one `find` request per keystroke and returns the engine's ranked
/// lines untouched apart from cleanup (escape stripping, trimming, dropping
/// empties). The engine's ordering is authoritative: no client-side sorting,
/// filtering, or deduplication ever happens here.
pub struct QueryDispatcher<S: RankedStore + 'static> {
    store: Arc<S>,
    options: QueryOptions,
}

impl<S: RankedStore + 'static> QueryDispatcher<S> {
    pub fn new(store: Arc<S>, options: QueryOptions) -> Self {
        Self { store, options }
    }

    /// A failed invocation degrades to an empty result set: queries fire on
    /// every keystroke, and an error dialog per keystroke would be unusable.
    /// The failure still lands in the diagnostic log.
    pub async fn query(&self, category: Category, query_text: &str) -> Vec<String> {
        let request = QueryRequest {
            category,
            query_text: query_text.to_owned(),
            result_cap: self.options.result_cap,
            syntax_mode: self.options.syntax_mode,
            case_sensitivity: self.options.case_sensitivity,
            home_tilde: self.options.home_tilde,
            relative_paths: self.options.relative_paths,
        };

        match self.store.find(&request).await {
            Ok(stdout) => clean_lines(&stdout),
            Err(err) => {
                warn!(%err, query = query_text, "find failed, returning empty result set");
                Vec::new()
            }
        }
    }
}

fn clean_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| ANSI_SEQUENCE.replace_all(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
