use crate::config::PreflightConfig;
use crate::discovery::{has_top_level_file, FilePattern};
use crate::error::Result;
use crate::git::{StatusProbe, TreeStatus};
use std::fmt;
use std::path::{Path, PathBuf};

/// Problems found before any file is touched.
/// Fatal issues stop the run; the rest are reported as warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum PreflightIssue {
    /// The working root does not exist or is not a directory
    MissingRoot { root: PathBuf },
    /// No solution file in the top directory of the working root
    MissingSolution { root: PathBuf, pattern: String },
    /// Tracked files have uncommitted changes
    DirtyWorkingTree { root: PathBuf },
    /// Working tree status could not be determined
    StatusUnknown { root: PathBuf },
}

impl PreflightIssue {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PreflightIssue::StatusUnknown { .. })
    }
}

impl fmt::Display for PreflightIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightIssue::MissingRoot { root } => {
                write!(f, "Directory \"{}\" does not exist", root.display())
            }
            PreflightIssue::MissingSolution { root, pattern } => write!(
                f,
                "Directory \"{}\" does not contain a solution file ({})",
                root.display(),
                pattern
            ),
            PreflightIssue::DirtyWorkingTree { .. } => {
                write!(
                    f,
                    "Git status: Commit your changes before incrementing the build number"
                )
            }
            PreflightIssue::StatusUnknown { root } => write!(
                f,
                "Git status of \"{}\" is unknown, continuing anyway",
                root.display()
            ),
        }
    }
}

/// Run the configured checks against `root`
///
/// Stops at the first fatal issue. A missing root is always checked.
pub fn run_checks(
    root: &Path,
    config: &PreflightConfig,
    probe: &dyn StatusProbe,
) -> Result<Vec<PreflightIssue>> {
    if !root.is_dir() {
        return Ok(vec![PreflightIssue::MissingRoot {
            root: root.to_path_buf(),
        }]);
    }

    if config.require_solution {
        let pattern = FilePattern::new(config.solution_pattern.as_str())?;
        if !has_top_level_file(root, &pattern) {
            return Ok(vec![PreflightIssue::MissingSolution {
                root: root.to_path_buf(),
                pattern: pattern.pattern,
            }]);
        }
    }

    let mut issues = Vec::new();
    if config.require_clean_tree {
        match probe.status(root) {
            TreeStatus::Clean => {}
            TreeStatus::Dirty => issues.push(PreflightIssue::DirtyWorkingTree {
                root: root.to_path_buf(),
            }),
            TreeStatus::Unknown => issues.push(PreflightIssue::StatusUnknown {
                root: root.to_path_buf(),
            }),
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockStatusProbe;
    use std::fs;
    use tempfile::TempDir;

    fn solution_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("App.sln"), "").unwrap();
        dir
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let issues = run_checks(
            &missing,
            &PreflightConfig::default(),
            &MockStatusProbe::default(),
        )
        .unwrap();
        assert_eq!(issues, vec![PreflightIssue::MissingRoot { root: missing }]);
        assert!(issues[0].is_fatal());
    }

    #[test]
    fn test_missing_solution_skips_git_probe() {
        let dir = TempDir::new().unwrap();
        let probe = MockStatusProbe::new(TreeStatus::Dirty);
        let issues = run_checks(dir.path(), &PreflightConfig::default(), &probe).unwrap();
        assert!(matches!(issues[..], [PreflightIssue::MissingSolution { .. }]));
        assert!(probe.queried().is_empty());
    }

    #[test]
    fn test_dirty_tree_is_fatal() {
        let dir = solution_dir();
        let issues = run_checks(
            dir.path(),
            &PreflightConfig::default(),
            &MockStatusProbe::new(TreeStatus::Dirty),
        )
        .unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_fatal());
        assert!(issues[0].to_string().contains("Commit your changes"));
    }

    #[test]
    fn test_unknown_status_is_a_warning() {
        let dir = solution_dir();
        let issues = run_checks(
            dir.path(),
            &PreflightConfig::default(),
            &MockStatusProbe::new(TreeStatus::Unknown),
        )
        .unwrap();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_fatal());
    }

    #[test]
    fn test_checks_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let config = PreflightConfig {
            require_solution: false,
            require_clean_tree: false,
            ..PreflightConfig::default()
        };
        let probe = MockStatusProbe::new(TreeStatus::Dirty);
        assert!(run_checks(dir.path(), &config, &probe).unwrap().is_empty());
        assert!(probe.queried().is_empty());
    }
}
