//! Library error type
//!
//! Every fallible library operation returns [`RunnerError`]. Per-unit failures
//! (a child exiting non-zero, a file missing from the manifest) are *not*
//! errors: they are recorded as [`crate::runner::UnitOutcome::Failed`] and the
//! batch continues. Only conditions that end the whole invocation live here.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    #[error("failed to read manifest '{}': {source}", path.display())]
    #[diagnostic(
        code(example_runner::manifest_read),
        help("the manifest is expected relative to the working directory; pass --manifest to override")
    )]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan example root '{}': {source}", path.display())]
    #[diagnostic(
        code(example_runner::source_walk),
        help("pass --root or set EXAMPLE_RUNNER_ROOT to point at the example tree")
    )]
    SourceWalk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dependency sync `{command}` failed")]
    #[diagnostic(code(example_runner::dependency_sync), help("{output}"))]
    DependencySync { command: String, output: String },

    #[error("failed to spawn `{command}`: {source}")]
    #[diagnostic(code(example_runner::spawn))]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type RunnerResult<T> = Result<T, RunnerError>;
