//! # omv-cli: OWASP Metadata Validation Step
//!
//! Provides the `omv` binary run as a CI pipeline step against a checked-out
//! repository. One invocation performs one linear pass:
//!
//! 1. [`discovery`]: find exactly one recognized metadata file directly
//!    under the workspace root (or take the explicitly configured file).
//! 2. Loading: parse it as YAML ([`omv_schema::load_document`]).
//! 3. Validation: apply the schema selected by its filename.
//! 4. [`report`]: print one line to stdout (success) or stderr (failure)
//!    and return exit code 0 or 1.
//!
//! ```bash
//! # Inside the action container (GITHUB_WORKSPACE is set by the runner):
//! omv
//! # Locally:
//! omv --workspace path/to/repo
//! omv --file path/to/repo/project.owasp.yaml
//! ```

pub mod config;
pub mod discovery;
pub mod pipeline;
pub mod report;

use std::io::Write;

use anyhow::{Context, Result};

pub use config::{Cli, Config, LogFormat, DEFAULT_WORKSPACE};
pub use pipeline::run_pipeline;

/// Run one validation pass and write its report.
///
/// Returns the process exit code. The only `Err` is a failure to write the
/// report itself.
pub fn run<O: Write, E: Write>(config: &Config, out: &mut O, err: &mut E) -> Result<u8> {
    let outcome = run_pipeline(config);
    report::write_report(&outcome, out, err).context("failed to write validation report")
}
