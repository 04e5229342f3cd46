use crate::actions::{self, ActionOptions};
use crate::config::BridgeConfig;
use crate::dispatch::UpdateDispatcher;
use crate::engine::EngineClient;
use crate::error::Result;
use crate::events::{EventKind, UsageObserver};
use crate::path_filter::PathFilter;
use crate::query::{QueryDispatcher, QueryOptions};
use crate::session::PickerUi;
use crate::shell::EditorShell;
use crate::tracker::DebouncedTracker;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Activation-time wiring: validates the configuration snapshot once and
/// builds every component from it. Lives for one activation; a
/// configuration change means building a new bridge.
pub struct Bridge {
    observer: UsageObserver<EngineClient>,
    queries: Arc<QueryDispatcher<EngineClient>>,
    engine: Arc<EngineClient>,
    action_options: ActionOptions,
    log_level: Option<String>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Result<Self> {
        crate::log::install_panic_hook();
        config.weights.validate()?;
        let filter = Arc::new(PathFilter::new(&config.exclude_globs)?);
        let engine = Arc::new(EngineClient::new(config.engine_program.clone()));

        let dispatcher = UpdateDispatcher::new(Arc::clone(&engine), filter);
        let tracker = DebouncedTracker::new(
            dispatcher.clone(),
            Duration::from_millis(config.debounce_delay_ms),
            config.weights.weight_for(EventKind::ActiveFocus)?,
        );
        let observer = UsageObserver::new(dispatcher, tracker, config.weights.clone());

        let queries = Arc::new(QueryDispatcher::new(
            Arc::clone(&engine),
            QueryOptions::from_config(&config),
        ));
        let action_options = ActionOptions {
            open_in_new_tab: config.open_in_new_tab,
            nested_pick_exclude: config.nested_pick_exclude.clone(),
            nested_pick_cap: config.nested_pick_cap,
        };

        Ok(Self {
            observer,
            queries,
            engine,
            action_options,
            log_level: config.log_level,
        })
    }

    /// Route tracing output to a file chosen by the host, at the configured
    /// level. Single-shot per process, like the underlying subscriber.
    pub fn init_logging(&self, log_file_path: &str) -> Result<String> {
        crate::log::init_tracing(log_file_path, self.log_level.as_deref())
    }

    /// One-shot availability check for the external engine. Returns a
    /// warning message to surface persistently when the engine is missing;
    /// nothing else is blocked either way, later calls just keep failing
    /// under their own rules.
    pub async fn startup_probe(&self) -> Option<String> {
        match self.engine.probe().await {
            Ok(version) => {
                info!(engine = %self.engine.program().display(), version = %version, "engine available");
                None
            }
            Err(err) => Some(format!(
                "Frecency engine '{}' is not available ({err}). \
                 Tracking and search will return nothing until it is installed.",
                self.engine.program().display()
            )),
        }
    }

    /// Feed editor events here.
    pub fn observer(&self) -> &UsageObserver<EngineClient> {
        &self.observer
    }

    pub async fn file_search<U: PickerUi, E: EditorShell>(&self, ui: &mut U, shell: &mut E) {
        actions::interactive_file_search(&self.queries, &self.action_options, ui, shell).await;
    }

    pub async fn directory_search<U: PickerUi, E: EditorShell>(&self, ui: &mut U, shell: &mut E) {
        actions::interactive_directory_search(&self.queries, &self.action_options, ui, shell).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn activation_validates_exclusion_globs() {
        let config = BridgeConfig {
            exclude_globs: vec!["a{".to_string()],
            ..BridgeConfig::default()
        };
        assert!(matches!(
            Bridge::new(config),
            Err(Error::InvalidExcludeGlob { .. })
        ));
    }

    #[test]
    fn activation_validates_the_weight_table() {
        let config: BridgeConfig = serde_json::from_str(
            r#"{ "weights": { "open": null, "manual-save": null, "auto-save": null,
                 "active-focus": null, "directory-visit": null } }"#,
        )
        .unwrap();
        assert!(matches!(
            Bridge::new(config),
            Err(Error::UnmappedEventKind(_))
        ));
    }

    #[tokio::test]
    async fn missing_engine_probe_produces_a_warning() {
        let config = BridgeConfig {
            engine_program: "/nonexistent/frecency-engine".into(),
            ..BridgeConfig::default()
        };
        let bridge = Bridge::new(config).unwrap();
        let warning = bridge.startup_probe().await.expect("warning for missing engine");
        assert!(warning.contains("/nonexistent/frecency-engine"));
    }
}
