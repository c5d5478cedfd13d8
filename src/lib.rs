#![forbid(unsafe_code)]
//! Manifest-driven CI checks for a tree of example programs
//!
//! A hand-maintained manifest (`files_to_test.txt`) lists every example as a
//! compilation unit: one or more source files plus optional runtime arguments.
//! This crate provides:
//!
//! - [`manifest`]: parsing, token classification, and file lookup
//! - [`checker`]: the manifest-versus-disk consistency report
//! - [`runner`]: the sequential build/run loop over manifest units
//! - [`cli`]: the `example-runner` and `example-check` front ends
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `runner` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod checker;
pub mod cli;
pub mod config;
pub mod errors;
pub mod manifest;
pub mod runner;
pub mod source_tree;

pub use checker::{ConsistencyReport, check};
pub use config::{RunnerConfig, ToolCommand};
pub use errors::{RunnerError, RunnerResult};
pub use manifest::{Manifest, ManifestLine, Token, classify_token, should_process_line};
pub use runner::{Action, Invocation, RunSummary, UnitOutcome};
