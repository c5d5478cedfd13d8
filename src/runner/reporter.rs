//! Unit result reporting
//!
//! Implement [`Reporter`] to change the output format; [`ConsoleReporter`]
//! writes one `PASS`/`FAIL` line per unit with failure output indented below.

use std::io::{self, Write};

use super::{RunSummary, Unit, UnitOutcome};

pub trait Reporter {
    /// Called once per unit after its process has exited
    fn on_unit_complete(&mut self, unit: &Unit<'_>, outcome: &UnitOutcome);

    /// Called after the last unit
    fn on_run_complete(&mut self, _summary: &RunSummary) {}
}

/// Plain-text reporter
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_unit_complete(&mut self, unit: &Unit<'_>, outcome: &UnitOutcome) {
        // Reporting is best effort; a closed stdout must not abort the batch.
        match outcome {
            UnitOutcome::Passed => {
                let _ = writeln!(self.out, "PASS {}", unit.label);
            }
            UnitOutcome::Failed { output } => {
                let _ = writeln!(self.out, "FAIL {}", unit.label);
                for line in output.lines() {
                    let _ = writeln!(self.out, "    {}", line);
                }
            }
        }
        let _ = self.out.flush();
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let _ = writeln!(self.out, "{} passed, {} failed", summary.passed, summary.failed);
        let _ = self.out.flush();
    }
}
