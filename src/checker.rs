//! Manifest consistency checker
//!
//! Compares the source files found on disk with the files the manifest
//! registers. Read-only: neither side is modified.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::config::RunnerConfig;
use crate::errors::RunnerResult;
use crate::manifest::Manifest;
use crate::source_tree::discover_source_files;

/// Symmetric difference between the source tree and the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Present on disk, absent from the manifest
    pub unregistered: BTreeSet<String>,
    /// Registered in the manifest, absent from disk
    pub dangling: BTreeSet<String>,
}

impl ConsistencyReport {
    pub fn compare<I>(on_disk: &BTreeSet<String>, registered: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let registered: BTreeSet<String> = registered.into_iter().map(|p| p.as_ref().to_string()).collect();
        Self {
            unregistered: on_disk.difference(&registered).cloned().collect(),
            dangling: registered.difference(on_disk).cloned().collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.unregistered.is_empty() && self.dangling.is_empty()
    }

    /// Human-readable report; empty when clean.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.unregistered.is_empty() {
            out.push_str("unregistered files (on disk, missing from manifest):\n");
            for path in &self.unregistered {
                let _ = writeln!(out, "  {}", path);
            }
        }
        if !self.dangling.is_empty() {
            out.push_str("dangling manifest entries (in manifest, missing on disk):\n");
            for path in &self.dangling {
                let _ = writeln!(out, "  {}", path);
            }
        }
        out
    }
}

/// Check the manifest named by `config` against the example tree.
pub fn check(config: &RunnerConfig) -> RunnerResult<ConsistencyReport> {
    let on_disk = discover_source_files(config)?;
    let manifest = Manifest::load(&config.manifest, &config.extension)?;
    let report = ConsistencyReport::compare(&on_disk, manifest.registered_paths());
    tracing::info!(
        "checked {} file(s): {} unregistered, {} dangling",
        on_disk.len(),
        report.unregistered.len(),
        report.dangling.len()
    );
    Ok(report)
}
