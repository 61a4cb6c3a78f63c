//! Reporting of per-file outcomes and the final version summary
//!
//! The engine never prints. It hands every outcome to a [Reporter]:
//! [ConsoleReporter] for the command line, [RecordingReporter] for tests.

use crate::domain::VersionSet;
use crate::error::BumpError;
use crate::preflight::PreflightIssue;
use crate::rewrite::{RewriteTarget, SkipReason};
use crate::ui;
use std::path::PathBuf;

/// Receives the observable events of a run
pub trait Reporter {
    /// A file was (or, in a dry run, would be) rewritten
    fn rewritten(&mut self, target: &RewriteTarget, versions: &[String]);

    /// A file was left alone without an error
    fn skipped(&mut self, target: &RewriteTarget, reason: SkipReason);

    /// A file could not be read, parsed or written; it is left unmodified
    fn failed(&mut self, target: &RewriteTarget, error: &BumpError);

    fn preflight_issue(&mut self, issue: &PreflightIssue);

    /// Distinct new versions of the whole run
    fn summary(&mut self, versions: &VersionSet);
}

/// Reporter printing to the terminal through [crate::ui]
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new(dry_run: bool) -> Self {
        ConsoleReporter { dry_run }
    }
}

impl Reporter for ConsoleReporter {
    fn rewritten(&mut self, target: &RewriteTarget, _versions: &[String]) {
        if self.dry_run {
            ui::display_status(&format!("Would update {}", target.path.display()));
        } else {
            ui::display_success(&target.path.display().to_string());
        }
    }

    fn skipped(&mut self, _target: &RewriteTarget, _reason: SkipReason) {}

    fn failed(&mut self, target: &RewriteTarget, error: &BumpError) {
        ui::display_error(&format!("{}: {}", target.path.display(), error));
        if matches!(error, BumpError::Version(_)) {
            ui::display_status("Not changing current version.");
        }
    }

    fn preflight_issue(&mut self, issue: &PreflightIssue) {
        if issue.is_fatal() {
            ui::display_error(&issue.to_string());
        } else {
            ui::display_warning(&issue.to_string());
        }
    }

    fn summary(&mut self, versions: &VersionSet) {
        ui::display_version_report(versions);
    }
}

/// One recorded event
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Rewritten { path: PathBuf, versions: Vec<String> },
    Skipped { path: PathBuf, reason: SkipReason },
    Failed { path: PathBuf, kind: &'static str, message: String },
    Preflight(PreflightIssue),
    Summary(Vec<String>),
}

/// Reporter that records every event for later inspection
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of files reported as rewritten
    pub fn rewritten_paths(&self) -> Vec<PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Rewritten { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Paths of files reported as failed
    pub fn failed_paths(&self) -> Vec<PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Failed { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn rewritten(&mut self, target: &RewriteTarget, versions: &[String]) {
        self.events.push(ReportEvent::Rewritten {
            path: target.path.clone(),
            versions: versions.to_vec(),
        });
    }

    fn skipped(&mut self, target: &RewriteTarget, reason: SkipReason) {
        self.events.push(ReportEvent::Skipped {
            path: target.path.clone(),
            reason,
        });
    }

    fn failed(&mut self, target: &RewriteTarget, error: &BumpError) {
        self.events.push(ReportEvent::Failed {
            path: target.path.clone(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    fn preflight_issue(&mut self, issue: &PreflightIssue) {
        self.events.push(ReportEvent::Preflight(issue.clone()));
    }

    fn summary(&mut self, versions: &VersionSet) {
        self.events
            .push(ReportEvent::Summary(versions.as_slice().to_vec()));
    }
}
