//! Two-phase rewriting of a source tree
//!
//! Planning discovers files and computes every rewrite in memory without
//! writing anything. Applying writes the planned files and reports each
//! outcome. A file is either written in full or not at all.

use crate::config::FilesConfig;
use crate::discovery::{compile_patterns, find_files};
use crate::domain::{IncrementMode, VersionSet};
use crate::error::{BumpError, Result};
use crate::report::Reporter;
use crate::rewrite::{RewriteOutcome, RewriteTarget, Rewriter, SkipReason, TargetKind};
use std::fs;
use std::path::Path;

/// Order in which file kinds are processed in a full run
pub const PROCESSING_ORDER: [TargetKind; 3] = [
    TargetKind::ProjectManifest,
    TargetKind::SourceDeclaration,
    TargetKind::PackageManifest,
];

/// The computed outcome for one file
#[derive(Debug)]
pub struct PlannedRewrite {
    pub target: RewriteTarget,
    pub outcome: RewriteOutcome,
}

/// All planned rewrites of a run, in processing order
#[derive(Debug, Default)]
pub struct RewritePlan {
    pub entries: Vec<PlannedRewrite>,
}

/// Read `target` and run `rewriter` over its content
pub fn plan_target(
    target: RewriteTarget,
    rewriter: &dyn Rewriter,
    mode: IncrementMode,
) -> PlannedRewrite {
    let outcome = match fs::read_to_string(&target.path) {
        Ok(content) => rewriter.rewrite(&content, mode),
        Err(e) => RewriteOutcome::Failed(BumpError::Io(e)),
    };
    PlannedRewrite { target, outcome }
}

/// Plan every file of one kind under `root` whose name matches `patterns`
pub fn plan_kind(
    root: &Path,
    kind: TargetKind,
    patterns: &[String],
    exclude_dirs: &[String],
    mode: IncrementMode,
) -> Result<Vec<PlannedRewrite>> {
    let patterns = compile_patterns(patterns)?;
    let rewriter = kind.rewriter()?;

    let planned = find_files(root, &patterns, exclude_dirs)
        .into_iter()
        .map(|path| plan_target(RewriteTarget::new(path, kind), rewriter.as_ref(), mode))
        .collect::<Vec<_>>();

    tracing::debug!(kind = %kind, files = planned.len(), "planned");
    Ok(planned)
}

/// Plan project manifests, then source declarations, then package manifests
pub fn plan_all(root: &Path, mode: IncrementMode, files: &FilesConfig) -> Result<RewritePlan> {
    let mut entries = Vec::new();
    for kind in PROCESSING_ORDER {
        let patterns = match kind {
            TargetKind::ProjectManifest => &files.project_manifests,
            TargetKind::SourceDeclaration => &files.source_declarations,
            TargetKind::PackageManifest => &files.package_manifests,
        };
        entries.extend(plan_kind(root, kind, patterns, &files.exclude_dirs, mode)?);
    }
    Ok(RewritePlan { entries })
}

impl RewritePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Versions the plan would produce if every write succeeded
    pub fn versions(&self) -> VersionSet {
        self.entries
            .iter()
            .flat_map(|entry| entry.outcome.versions().iter().cloned())
            .collect()
    }

    /// Report every outcome without writing anything
    pub fn preview(&self, reporter: &mut dyn Reporter) -> VersionSet {
        let mut versions = VersionSet::new();
        for entry in &self.entries {
            match &entry.outcome {
                RewriteOutcome::Rewritten(rewrite) => {
                    reporter.rewritten(&entry.target, &rewrite.versions);
                    versions.extend(rewrite.versions.iter().cloned());
                }
                RewriteOutcome::Skipped(reason) => report_skip(entry, *reason, reporter),
                RewriteOutcome::Failed(error) => report_failure(entry, error, reporter),
            }
        }
        versions
    }

    /// Write every rewritten file and report each outcome
    ///
    /// Files that fail to write contribute no version.
    pub fn apply(self, reporter: &mut dyn Reporter) -> VersionSet {
        let mut versions = VersionSet::new();
        for entry in self.entries {
            match &entry.outcome {
                RewriteOutcome::Rewritten(rewrite) => {
                    match fs::write(&entry.target.path, &rewrite.content) {
                        Ok(()) => {
                            tracing::info!(
                                path = %entry.target.path.display(),
                                versions = ?rewrite.versions,
                                "rewritten"
                            );
                            reporter.rewritten(&entry.target, &rewrite.versions);
                            versions.extend(rewrite.versions.iter().cloned());
                        }
                        Err(e) => report_failure(&entry, &BumpError::Io(e), reporter),
                    }
                }
                RewriteOutcome::Skipped(reason) => report_skip(&entry, *reason, reporter),
                RewriteOutcome::Failed(error) => report_failure(&entry, error, reporter),
            }
        }
        versions
    }
}

fn report_skip(entry: &PlannedRewrite, reason: SkipReason, reporter: &mut dyn Reporter) {
    tracing::debug!(path = %entry.target.path.display(), %reason, "skipped");
    reporter.skipped(&entry.target, reason);
}

fn report_failure(entry: &PlannedRewrite, error: &BumpError, reporter: &mut dyn Reporter) {
    tracing::warn!(
        path = %entry.target.path.display(),
        kind = error.kind(),
        error = %error,
        "left unmodified"
    );
    reporter.failed(&entry.target, error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{RecordingReporter, ReportEvent};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> std::path::PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_plan_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "App/App.csproj",
            "<Project><Version>1.0.0</Version></Project>",
        );

        let plan = plan_all(dir.path(), IncrementMode::Build, &FilesConfig::default()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.versions().as_slice(), &["1.0.1".to_string()]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<Project><Version>1.0.0</Version></Project>"
        );
    }

    #[test]
    fn test_apply_writes_and_collects_versions() {
        let dir = TempDir::new().unwrap();
        let project = write(
            dir.path(),
            "App/App.csproj",
            "<Project><Version>1.2.3</Version></Project>",
        );
        let info = write(
            dir.path(),
            "App/Properties/AssemblyInfo.cs",
            "[assembly: AssemblyVersion(\"1.2.3.0\")]\n",
        );

        let plan = plan_all(dir.path(), IncrementMode::Build, &FilesConfig::default()).unwrap();
        let mut reporter = RecordingReporter::new();
        let versions = plan.apply(&mut reporter);

        assert_eq!(versions.as_slice(), &["1.2.4".to_string()]);
        assert_eq!(
            fs::read_to_string(project).unwrap(),
            "<Project><Version>1.2.4</Version></Project>"
        );
        assert_eq!(
            fs::read_to_string(info).unwrap(),
            "[assembly: AssemblyVersion(\"1.2.4\")]\n"
        );
        assert_eq!(reporter.rewritten_paths().len(), 2);
    }

    #[test]
    fn test_failed_file_is_left_untouched_and_run_continues() {
        let dir = TempDir::new().unwrap();
        let broken = write(dir.path(), "a/package.json", "{\"version\": \"abc\"}");
        let good = write(dir.path(), "b/package.json", "{\"version\": \"0.1.0\"}");

        let plan = plan_all(dir.path(), IncrementMode::Build, &FilesConfig::default()).unwrap();
        let mut reporter = RecordingReporter::new();
        let versions = plan.apply(&mut reporter);

        assert_eq!(versions.as_slice(), &["0.1.1".to_string()]);
        assert_eq!(
            fs::read_to_string(&broken).unwrap(),
            "{\"version\": \"abc\"}"
        );
        assert_eq!(reporter.failed_paths(), vec![broken]);
        assert_eq!(reporter.rewritten_paths(), vec![good]);
    }

    #[test]
    fn test_skips_are_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "App.csproj", "<Project />");

        let plan = plan_all(dir.path(), IncrementMode::Build, &FilesConfig::default()).unwrap();
        let mut reporter = RecordingReporter::new();
        assert!(plan.apply(&mut reporter).is_empty());
        assert!(matches!(
            reporter.events[..],
            [ReportEvent::Skipped {
                reason: SkipReason::NoVersionToken,
                ..
            }]
        ));
    }

    #[test]
    fn test_preview_reports_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "package.json", "{\"version\": \"1.0.0\"}\n");

        let plan = plan_all(dir.path(), IncrementMode::MinorAndReset, &FilesConfig::default())
            .unwrap();
        let mut reporter = RecordingReporter::new();
        let versions = plan.preview(&mut reporter);

        assert_eq!(versions.as_slice(), &["1.1.0".to_string()]);
        assert_eq!(reporter.rewritten_paths(), vec![path.clone()]);
        assert_eq!(fs::read_to_string(path).unwrap(), "{\"version\": \"1.0.0\"}\n");
    }

    #[test]
    fn test_unreadable_file_is_failed() {
        let dir = TempDir::new().unwrap();
        let target = RewriteTarget::new(
            dir.path().join("missing.csproj"),
            TargetKind::ProjectManifest,
        );
        let rewriter = TargetKind::ProjectManifest.rewriter().unwrap();
        let planned = plan_target(target, rewriter.as_ref(), IncrementMode::Build);
        assert!(matches!(planned.outcome, RewriteOutcome::Failed(BumpError::Io(_))));
    }

    #[test]
    fn test_write_failure_contributes_no_version() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "App/App.csproj",
            "<Project><Version>1.0.0</Version></Project>",
        );

        let plan = plan_all(dir.path(), IncrementMode::Build, &FilesConfig::default()).unwrap();
        assert_eq!(plan.versions().len(), 1);

        // Writing to a directory fails
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let mut reporter = RecordingReporter::new();
        let versions = plan.apply(&mut reporter);

        assert!(versions.is_empty());
        assert!(matches!(
            &reporter.events[..],
            [ReportEvent::Failed { path: failed, kind: "io", .. }] if *failed == path
        ));
    }
}
