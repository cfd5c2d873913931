// src/report.rs

//! User-facing status output
//!
//! Both entry points print through one reporting layer. The only difference
//! between them is `swallow_errors`: the package-manager hook must never
//! break the host's own install, so it downgrades every error to a warning
//! and always exits 0; the CLI reports errors loudly with a non-zero exit.
//!
//! # Design
//!
//! The `Reporter` trait is the sink for status lines. Implementations:
//! - `ConsoleReporter`: stdout for status, stderr for errors
//! - `MemoryReporter`: captures lines for tests
//!
//! Quiet mode lives on the layer, not in a sink: it drops per-component
//! action lines only. Errors and the final summary are always printed.

use crate::error::Error;
use crate::reconcile::{
    Action, ApplyObserver, PlannedAction, ReconciliationPlan, ReconciliationResult,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::debug;

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Status,
    Warning,
    Error,
}

/// Sink for status lines
pub trait Reporter {
    fn line(&self, level: Level, message: &str);
}

/// Prints status to stdout and problems to stderr
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&self, level: Level, message: &str) {
        match level {
            Level::Status => println!("{}", message),
            Level::Warning => eprintln!("warning: {}", message),
            Level::Error => eprintln!("error: {}", message),
        }
    }
}

/// Collects lines in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines in order
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Captured messages at a given level
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn line(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, message.to_string()));
    }
}

/// Process exit status for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Run finished but at least one component failed
    PartialFailure,
    /// Run stopped before touching the destination
    Aborted,
}

impl ExitStatus {
    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::PartialFailure => 1,
            Self::Aborted => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Status line for a plan entry about to be applied
pub fn action_line(entry: &PlannedAction) -> String {
    let path = entry.component.relative_path.display();
    match entry.action {
        Action::Copy => format!("Copying {}", path),
        Action::Skip => format!("Skipping (exists) {}", path),
        Action::Overwrite => format!("Overwriting {}", path),
    }
}

/// The single reporting layer shared by hook and CLI
pub struct ReportLayer<'a> {
    reporter: &'a dyn Reporter,
    swallow_errors: bool,
    quiet: bool,
}

impl<'a> ReportLayer<'a> {
    pub fn new(reporter: &'a dyn Reporter, swallow_errors: bool) -> Self {
        Self {
            reporter,
            swallow_errors,
            quiet: false,
        }
    }

    /// Drop per-component action lines; errors and summaries still print
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn swallows_errors(&self) -> bool {
        self.swallow_errors
    }

    pub fn status(&self, message: &str) {
        self.reporter.line(Level::Status, message);
    }

    fn problem(&self, message: &str) {
        debug!("Reporting problem (swallow_errors={}): {}", self.swallow_errors, message);
        if self.swallow_errors {
            self.reporter.line(Level::Warning, message);
        } else {
            self.reporter.line(Level::Error, message);
        }
    }

    /// Print a plan without applying it
    pub fn dry_run(&self, plan: &ReconciliationPlan) {
        if plan.is_empty() {
            self.status("Nothing to do");
            return;
        }
        for entry in &plan.entries {
            self.status(&format!("[dry-run] {}", action_line(entry)));
        }
        self.status(&format!(
            "[dry-run] {} to copy, {} to overwrite, {} to skip",
            plan.count(Action::Copy),
            plan.count(Action::Overwrite),
            plan.count(Action::Skip)
        ));
    }

    /// Report a fatal error that stopped the run
    pub fn fatal(&self, err: &Error) -> ExitStatus {
        self.problem(&err.to_string());
        if self.swallow_errors {
            ExitStatus::Success
        } else {
            ExitStatus::Aborted
        }
    }

    /// Print the final summary and decide the exit status
    pub fn finish(
        &self,
        label: &str,
        result: &ReconciliationResult,
        backup: Option<&Path>,
    ) -> ExitStatus {
        self.status(&format!(
            "{}: {} copied, {} overwritten, {} skipped, {} failed",
            label,
            result.copied(),
            result.overwritten(),
            result.skipped(),
            result.failed()
        ));

        if let Some(location) = backup {
            self.status(&format!("Backup saved to {}", location.display()));
        }

        if result.is_success() || self.swallow_errors {
            return ExitStatus::Success;
        }

        for outcome in result.failures() {
            let path = outcome.entry.component.relative_path.display();
            self.reporter.line(Level::Error, &format!("  {} did not complete", path));
        }
        ExitStatus::PartialFailure
    }
}

impl ApplyObserver for ReportLayer<'_> {
    fn on_action(&self, entry: &PlannedAction) {
        if !self.quiet {
            self.status(&action_line(entry));
        }
    }

    fn on_error(&self, _entry: &PlannedAction, error: &Error) {
        self.problem(&error.to_string());
    }
}
