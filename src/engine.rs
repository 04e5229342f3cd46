//! Process contract with the external ranking engine.
//!
//! The engine owns the persistent weighted path database and answers two
//! operations, one process invocation each:
//!
//! ```text
//! <engine> update <files|directories> <path> --weight <w>
//! <engine> find <files|directories> [query] [--limit N] [--extended]
//!          [--case sensitive|insensitive] [--tilde] [--relative]
//! ```
//!
//! `find` writes ranked paths to stdout, newline-separated, best first. Any
//! non-zero exit is an opaque failure; this crate never parses error detail
//! out of the engine.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Files,
    Directories,
}

impl Category {
    pub fn as_arg(self) -> &'static str {
        match self {
            Category::Files => "files",
            Category::Directories => "directories",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxMode {
    #[default]
    Fuzzy,
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseSensitivity {
    /// Leave the decision to the engine.
    #[default]
    Default,
    Sensitive,
    Insensitive,
}

/// One `find` invocation, built fresh per keystroke from the configuration
/// snapshot plus the current query text. Has no identity beyond the call.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub category: Category,
    pub query_text: String,
    /// `None` means no limit is passed to the engine.
    pub result_cap: Option<u32>,
    pub syntax_mode: SyntaxMode,
    pub case_sensitivity: CaseSensitivity,
    pub home_tilde: bool,
    pub relative_paths: bool,
}

/// The external ranked store, as seen by the rest of the crate. Process
/// details stay behind this seam so tests can script responses and
/// interleavings.
#[async_trait]
pub trait RankedStore: Send + Sync {
    async fn update(&self, category: Category, weight: f64, path: &str) -> Result<()>;

    /// Raw stdout of one `find` invocation. Line handling (trimming, escape
    /// stripping) is the query dispatcher's job.
    async fn find(&self, request: &QueryRequest) -> Result<String>;
}

/// Process-backed [`RankedStore`].
#[derive(Debug, Clone)]
pub struct EngineClient {
    program: PathBuf,
}

impl EngineClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// One-shot availability check, run at activation. Returns the engine's
    /// version line so it can be logged next to the warning surface.
    pub async fn probe(&self) -> Result<String> {
        let output = self.command(["--version"]).output().await.map_err(|source| {
            Error::EngineSpawn {
                program: self.program.clone(),
                source,
            }
        })?;
        if !output.status.success() {
            return Err(Error::EngineExit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn command<I, A>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = A>,
        A: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd
    }
}

#[async_trait]
impl RankedStore for EngineClient {
    async fn update(&self, category: Category, weight: f64, path: &str) -> Result<()> {
        let mut cmd = self.command(["update", category.as_arg(), path]);
        cmd.arg("--weight").arg(weight.to_string());

        let output = cmd.output().await.map_err(|source| Error::EngineSpawn {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(Error::EngineExit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn find(&self, request: &QueryRequest) -> Result<String> {
        let mut cmd = self.command(["find", request.category.as_arg()]);
        if !request.query_text.is_empty() {
            cmd.arg(&request.query_text);
        }
        if let Some(cap) = request.result_cap {
            cmd.arg("--limit").arg(cap.to_string());
        }
        if request.syntax_mode == SyntaxMode::Extended {
            cmd.arg("--extended");
        }
        match request.case_sensitivity {
            CaseSensitivity::Default => {}
            CaseSensitivity::Sensitive => {
                cmd.arg("--case").arg("sensitive");
            }
            CaseSensitivity::Insensitive => {
                cmd.arg("--case").arg("insensitive");
            }
        }
        if request.home_tilde {
            cmd.arg("--tilde");
        }
        if request.relative_paths {
            cmd.arg("--relative");
        }

        let output = cmd.output().await.map_err(|source| Error::EngineSpawn {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(Error::EngineExit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
