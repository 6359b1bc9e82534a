//! # Configuration
//!
//! Command-line flags, each backed by an environment variable so the step
//! runs with no arguments inside the action container.
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | `--workspace` | `GITHUB_WORKSPACE` | `/github/workspace` |
//! | `--file` | `INPUT_FILE_PATH` | unset (discovery mode) |
//! | `--schema-dir` | `OMV_SCHEMA_DIR` | unset (built-in schemas) |
//! | `--log-format` | `OMV_LOG_FORMAT` | `text` |
//!
//! Empty values count as unset: the action runner exports every declared
//! input, set or not.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// The directory the action runner mounts the repository at.
pub const DEFAULT_WORKSPACE: &str = "/github/workspace";

/// Validate the OWASP metadata file of a repository.
///
/// Finds exactly one of chapter.owasp.yaml, committee.owasp.yaml, or
/// project.owasp.yaml in the workspace root and validates it against the
/// matching schema. Exits 0 when valid, 1 otherwise.
#[derive(Parser, Debug, Clone)]
#[command(name = "omv", version, about, long_about = None)]
pub struct Cli {
    /// Repository workspace to scan.
    #[arg(long, env = "GITHUB_WORKSPACE", value_name = "DIR")]
    pub workspace: Option<String>,

    /// Validate this file instead of scanning the workspace.
    #[arg(long, env = "INPUT_FILE_PATH", value_name = "PATH")]
    pub file: Option<String>,

    /// Load schemas from this directory instead of the built-in set.
    #[arg(long, env = "OMV_SCHEMA_DIR", value_name = "DIR")]
    pub schema_dir: Option<String>,

    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long, env = "OMV_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Resolved settings for one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Workspace root scanned by discovery.
    pub workspace: PathBuf,
    /// Explicit metadata file; bypasses discovery when set.
    pub file: Option<PathBuf>,
    /// Schema directory override.
    pub schema_dir: Option<PathBuf>,
}

impl Config {
    /// Discovery-mode settings for `workspace` with built-in schemas.
    pub fn for_workspace(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            file: None,
            schema_dir: None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<PathBuf> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

impl Cli {
    /// Resolve flags and environment into a [`Config`].
    pub fn config(&self) -> Config {
        Config {
            workspace: non_empty(&self.workspace).unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE)),
            file: non_empty(&self.file),
            schema_dir: non_empty(&self.schema_dir),
        }
    }

    /// Log filter directive for the verbosity count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
