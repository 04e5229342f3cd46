use std::path::PathBuf;
use std::process::ExitStatus;

use crate::events::EventKind;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Failed to invoke engine {program}: {source}")]
    EngineSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Engine exited with {status}: {stderr}")]
    EngineExit { status: ExitStatus, stderr: String },
    #[error("No weight configured for event kind {0:?}")]
    UnmappedEventKind(EventKind),
    #[error("Negative weight {weight} configured for event kind {kind:?}")]
    NegativeWeight { kind: EventKind, weight: f64 },
    #[error("Invalid exclusion glob {pattern}: {source}")]
    InvalidExcludeGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("Invalid listing glob {pattern}: {source}")]
    InvalidListingGlob {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration: {0}")]
    ConfigToml(#[from] toml::de::Error),
    #[error("Failed to parse configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("Failed to create log directory: {0}")]
    CreateLogDir(#[source] std::io::Error),
    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),
    #[error("Failed to open {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
