//! Main workflow orchestration logic
//!
//! Runs the pre-flight checks, plans and applies the rewrites, and maps the
//! result onto an exit status. Kept free of clap so the workflow can be
//! driven programmatically and in tests.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{IncrementMode, VersionSet};
use crate::error::Result;
use crate::git::StatusProbe;
use crate::plan::plan_all;
use crate::preflight::run_checks;
use crate::report::Reporter;

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Directory whose files are bumped
    pub root: PathBuf,

    pub mode: IncrementMode,

    /// Skip the pre-flight checks
    pub force: bool,

    /// Plan and report without writing files
    pub dry_run: bool,
}

/// Process exit status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Nothing was bumped
    NoNewVersions,
    ConfigError,
    /// Dirty working tree, missing root or missing solution file
    PreflightFailed,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::NoNewVersions => 1,
            ExitStatus::ConfigError => 2,
            ExitStatus::PreflightFailed => 99,
        }
    }
}

/// Result of a finished workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub status: ExitStatus,

    /// Distinct new versions, in first-seen order
    pub versions: VersionSet,
}

/// Main bump workflow
///
/// 1. Pre-flight checks (unless forced); a fatal issue ends the run
/// 2. Plan every rewrite in memory
/// 3. Apply the plan (or preview it in a dry run)
/// 4. Report the distinct new versions
///
/// # Returns
///
/// The exit status and versions, or an error if the file patterns are invalid
pub fn run_workflow(
    args: &RunArgs,
    config: &Config,
    probe: &dyn StatusProbe,
    reporter: &mut dyn Reporter,
) -> Result<WorkflowResult> {
    if !args.force {
        let issues = run_checks(&args.root, &config.preflight, probe)?;
        for issue in &issues {
            reporter.preflight_issue(issue);
        }
        if issues.iter().any(|issue| issue.is_fatal()) {
            return Ok(WorkflowResult {
                status: ExitStatus::PreflightFailed,
                versions: VersionSet::new(),
            });
        }
    }

    tracing::info!(root = %args.root.display(), mode = %args.mode, "incrementing versions");
    let plan = plan_all(&args.root, args.mode, &config.files)?;
    tracing::debug!(files = plan.len(), versions = ?plan.versions(), "plan ready");
    let versions = if args.dry_run {
        plan.preview(reporter)
    } else {
        plan.apply(reporter)
    };

    reporter.summary(&versions);
    let status = if versions.is_empty() {
        ExitStatus::NoNewVersions
    } else {
        ExitStatus::Success
    };

    Ok(WorkflowResult { status, versions })
}
