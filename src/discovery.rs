//! Recursive file discovery by file-name pattern

use crate::error::{BumpError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File name pattern with `*` and `?` wildcards (e.g., "*.csproj", "AssemblyInfo.cs")
///
/// Matching is case-insensitive and applies to the file name only.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pub pattern: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(BumpError::config("File pattern must not be empty"));
        }
        if pattern.contains(['/', '\\']) {
            return Err(BumpError::config(format!(
                "File pattern '{}' must be a file name, not a path",
                pattern
            )));
        }

        // Escape everything, then turn the escaped wildcards back into regex
        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\*", ".*").replace(r"\?", ".");
        let regex = Regex::new(&format!("(?i)^{}$", regex_pattern))?;

        Ok(FilePattern { pattern, regex })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

/// Compile a list of patterns
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<FilePattern>> {
    patterns.iter().map(|p| FilePattern::new(p.as_str())).collect()
}

fn matches_any(entry: &DirEntry, patterns: &[FilePattern]) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|d| d.eq_ignore_ascii_case(name)))
}

/// Find every file under `root` whose name matches one of `patterns`
///
/// Entries are visited in file-name order so results are deterministic.
/// Unreadable directories are logged and skipped.
pub fn find_files(
    root: &Path,
    patterns: &[FilePattern],
    exclude_dirs: &[String],
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, exclude_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && matches_any(&entry, patterns) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Whether the top directory of `root` contains a file matching `pattern`
pub fn has_top_level_file(root: &Path, pattern: &FilePattern) -> bool {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| {
            entry.file_type().is_file() && matches_any(&entry, std::slice::from_ref(pattern))
        })
}
