//! Manifest-driven build/run loop
//!
//! ## Modes
//!
//! - **Full**: every manifest line, in file order.
//! - **Targeted**: one unit per requested file, resolved to the manifest line
//!   that registers it. A file with no line fails without spawning anything.
//!
//! ## I/O Boundaries
//!
//! Process execution and reporting sit behind the [`UnitExecutor`] and
//! [`Reporter`] traits so the loop itself can be driven without a toolchain.
//!
//! Units run strictly one after another. The overall status is a fold over
//! unit outcomes into a [`RunSummary`]; an individual failure never stops the
//! batch.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod executor;
pub mod reporter;

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::{RunnerConfig, ToolCommand};
use crate::errors::{RunnerError, RunnerResult};
use crate::manifest::{Manifest, ManifestLine};

pub use executor::{Execution, ProcessExecutor, UnitExecutor};
pub use reporter::{ConsoleReporter, Reporter};

/// What to do with each unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Compile the unit's source files only
    Build,
    /// Execute the unit with its runtime arguments
    Run,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Build => write!(f, "build"),
            Action::Run => write!(f, "run"),
        }
    }
}

/// A fully resolved child process: program, argument vector, working directory.
///
/// Arguments are passed to the child as-is; nothing goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    fn from_tool<'a>(tool: &ToolCommand, extra: impl IntoIterator<Item = &'a str>, cwd: PathBuf) -> Self {
        let mut args = tool.args.clone();
        args.extend(extra.into_iter().map(str::to_string));
        Self {
            program: tool.program.clone(),
            args,
            cwd,
        }
    }

    /// Command for one manifest line.
    ///
    /// `build` passes only the source paths to the compiler; `run` passes the
    /// whole line, so the program receives the trailing tokens as arguments.
    pub fn for_line(action: Action, line: &ManifestLine, config: &RunnerConfig) -> Self {
        let cwd = config.root.clone();
        match action {
            Action::Build => Self::from_tool(&config.compiler, line.source_paths(), cwd),
            Action::Run => Self::from_tool(&config.interpreter, line.tokens.iter().map(|t| t.as_str()), cwd),
        }
    }

    /// Dependency sync pre-step, run in the example root.
    pub fn for_sync(sync: &ToolCommand, config: &RunnerConfig) -> Self {
        Self::from_tool(sync, [], config.root.clone())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One reported unit: a label plus the line it executes, if any was found.
#[derive(Debug, Clone)]
pub struct Unit<'m> {
    pub label: String,
    pub line: Option<&'m ManifestLine>,
}

/// Result of one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Passed,
    /// Failed with the captured output (or an explanation)
    Failed { output: String },
}

impl UnitOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, UnitOutcome::Passed)
    }
}

/// Folded result of a whole invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(self, outcome: &UnitOutcome) -> Self {
        if outcome.is_passed() {
            Self {
                passed: self.passed + 1,
                ..self
            }
        } else {
            Self {
                failed: self.failed + 1,
                ..self
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Plan the units for an invocation: full mode when `files` is empty.
pub fn plan_units<'m>(manifest: &'m Manifest, files: &[String], config: &RunnerConfig) -> Vec<Unit<'m>> {
    if files.is_empty() {
        return manifest
            .lines
            .iter()
            .map(|line| Unit {
                label: line.text.clone(),
                line: Some(line),
            })
            .collect();
    }

    files
        .iter()
        .map(|file| Unit {
            label: file.clone(),
            line: manifest.find_line_for(file, &config.root),
        })
        .collect()
}

/// Run the dependency sync pre-step. Any failure is fatal for the invocation.
pub fn sync_dependencies(config: &RunnerConfig, executor: &dyn UnitExecutor) -> RunnerResult<()> {
    let Some(sync) = &config.sync else {
        tracing::debug!("dependency sync disabled");
        return Ok(());
    };

    let invocation = Invocation::for_sync(sync, config);
    tracing::info!("syncing dependencies: {}", invocation);

    let execution = executor.execute(&invocation).map_err(|e| RunnerError::DependencySync {
        command: invocation.to_string(),
        output: e.to_string(),
    })?;

    if execution.success {
        Ok(())
    } else {
        Err(RunnerError::DependencySync {
            command: invocation.to_string(),
            output: execution.output,
        })
    }
}

fn execute_unit(action: Action, unit: &Unit<'_>, config: &RunnerConfig, executor: &dyn UnitExecutor) -> UnitOutcome {
    let Some(line) = unit.line else {
        tracing::warn!("{} is not registered in {}", unit.label, config.manifest.display());
        return UnitOutcome::Failed {
            output: format!("unregistered file: not listed in {}", config.manifest.display()),
        };
    };

    let invocation = Invocation::for_line(action, line, config);
    tracing::debug!("line {}: {}", line.number, invocation);

    match executor.execute(&invocation) {
        Ok(execution) if execution.success => UnitOutcome::Passed,
        Ok(execution) => UnitOutcome::Failed {
            output: execution.output,
        },
        Err(e) => UnitOutcome::Failed { output: e.to_string() },
    }
}

/// Run `action` over the manifest (full mode) or over `files` (targeted mode).
///
/// Returns `Err` only for fatal conditions: an unreadable manifest or a
/// failed dependency sync. Unit failures are counted in the summary.
pub fn run(
    action: Action,
    files: &[String],
    config: &RunnerConfig,
    executor: &dyn UnitExecutor,
    reporter: &mut dyn Reporter,
) -> RunnerResult<RunSummary> {
    let manifest = Manifest::load(&config.manifest, &config.extension)?;

    sync_dependencies(config, executor)?;

    let units = plan_units(&manifest, files, config);
    tracing::info!("{} {} unit(s)", action, units.len());

    let summary = units.iter().fold(RunSummary::default(), |summary, unit| {
        let outcome = execute_unit(action, unit, config, executor);
        reporter.on_unit_complete(unit, &outcome);
        summary.record(&outcome)
    });

    reporter.on_run_complete(&summary);
    Ok(summary)
}
