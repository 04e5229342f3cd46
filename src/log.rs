use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

// The non-blocking writer stops flushing once its guard drops; keep it for
// the life of the process.
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Route all tracing output to `log_file_path` at `log_level` (an env-filter
/// directive string, `info` when unset). Returns the resolved path. Calling
/// twice is an error: the global subscriber can only be installed once per
/// process.
pub fn init_tracing(log_file_path: &str, log_level: Option<&str>) -> Result<String> {
    let path = Path::new(log_file_path);
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "frecency-bridge.log".into());
    std::fs::create_dir_all(directory).map_err(Error::CreateLogDir)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match log_level {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|err| Error::TracingInit(err.to_string()))?
        }
        None => EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| Error::TracingInit(err.to_string()))?;

    let _ = LOG_GUARD.set(guard);
    tracing::info!(log_file = %path.display(), "tracing initialized");
    Ok(path.display().to_string())
}

/// Make sure panics land in the log even when the editor swallows stderr.
/// Installed once per process; repeat calls are no-ops.
pub fn install_panic_hook() {
    static INSTALL: std::sync::Once = std::sync::Once::new();
    INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|location| location.to_string())
                .unwrap_or_default();
            tracing::error!(%location, "panic: {info}");
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_single_shot() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("bridge.log");
        let log_path = log_path.to_str().unwrap();

        let resolved = init_tracing(log_path, Some("debug")).unwrap();
        assert_eq!(resolved, log_path);

        assert!(matches!(
            init_tracing(log_path, None),
            Err(Error::TracingInit(_))
        ));
    }

    #[test]
    fn invalid_filter_directive_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("bridge.log");
        let result = init_tracing(log_path.to_str().unwrap(), Some("not=a=filter"));
        assert!(matches!(result, Err(Error::TracingInit(_))));
    }
}
