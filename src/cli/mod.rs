//! CLI module
//!
//! ## Binaries
//!
//! - `example-runner <build|run> [file...]` - build or run manifest units
//! - `example-check` - cross-check the manifest against the example tree
//!
//! ## Design
//!
//! Arguments are parsed with clap derive macros. Command functions return
//! `CliResult<ExitCode>` instead of calling `process::exit`; only the
//! top-level `run_*` functions print errors and exit.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser};

use crate::checker;
use crate::config::RunnerConfig;
use crate::errors::RunnerError;
use crate::runner::{self, Action, ConsoleReporter, ProcessExecutor};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The entry points catch
/// these errors, print the message, and exit with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<RunnerError> for CliError {
    fn from(err: RunnerError) -> Self {
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definitions
// ============================================================================

/// Location overrides shared by both binaries
#[derive(Args, Debug, Default)]
pub struct PathArgs {
    /// Example root directory (default: examples, or $EXAMPLE_RUNNER_ROOT)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Manifest file (default: files_to_test.txt, or $EXAMPLE_RUNNER_MANIFEST)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

impl PathArgs {
    /// Environment-derived config with command-line overrides applied.
    pub fn resolve(&self) -> RunnerConfig {
        let mut config = RunnerConfig::from_env();
        if let Some(root) = &self.root {
            config = config.with_root(root);
        }
        if let Some(manifest) = &self.manifest {
            config = config.with_manifest(manifest);
        }
        config
    }
}

/// Build or run the example programs listed in the manifest
#[derive(Parser, Debug)]
#[command(name = "example-runner", version, long_about = None)]
pub struct RunnerCli {
    /// Action applied to every unit
    #[arg(value_enum)]
    pub action: Action,

    /// Files to process (default: every manifest line)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    #[command(flatten)]
    pub paths: PathArgs,

    /// Skip the dependency sync pre-step
    #[arg(long)]
    pub skip_sync: bool,
}

/// Check that the manifest and the example tree agree
#[derive(Parser, Debug)]
#[command(name = "example-check", version, long_about = None)]
pub struct CheckCli {
    #[command(flatten)]
    pub paths: PathArgs,
}

// ============================================================================
// Entry points
// ============================================================================

/// Structured logging on stderr with env-based filter, defaulting to info.
///
/// Stdout is left to unit results and the consistency report.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse arguments; usage errors exit with 1, `--help`/`--version` with 0.
fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            process::exit(code.0);
        }
    }
}

fn finish(result: CliResult<ExitCode>) {
    match result {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// `example-runner` entry point.
pub fn run_runner() {
    let cli = parse_or_exit::<RunnerCli>();
    finish(execute_runner(cli));
}

/// `example-check` entry point.
pub fn run_check() {
    let cli = parse_or_exit::<CheckCli>();
    finish(execute_check(cli));
}

/// Execute a parsed runner invocation.
pub fn execute_runner(cli: RunnerCli) -> CliResult<ExitCode> {
    let mut config = cli.paths.resolve();
    if cli.skip_sync {
        config = config.with_sync(None);
    }

    let mut reporter = ConsoleReporter::stdout();
    let summary = runner::run(cli.action, &cli.files, &config, &ProcessExecutor, &mut reporter)?;

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Per-unit output already printed
        Err(CliError::new("", ExitCode::FAILURE))
    }
}

/// Execute a parsed checker invocation.
pub fn execute_check(cli: CheckCli) -> CliResult<ExitCode> {
    let config = cli.paths.resolve();
    let report = checker::check(&config)?;

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        print!("{}", report.render());
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// Tests
// ============================================================================
