//! Format-preserving version rewriters
//!
//! Each rewriter is a pure transformation from file content to a
//! [`RewriteOutcome`]. Reading and writing files is left to [`crate::plan`].
//!
//! - [`text::TextRewriter`]: `[assembly: AssemblyVersion("X.Y.Z")]` declarations
//! - [`markup::MarkupRewriter`]: first `<Version>` element of an XML project file
//! - [`json::JsonRewriter`]: top-level `"version"` field of a JSON package manifest

pub mod json;
pub mod markup;
pub mod text;

pub use json::JsonRewriter;
pub use markup::MarkupRewriter;
pub use text::TextRewriter;

use crate::domain::IncrementMode;
use crate::error::{BumpError, Result};
use std::fmt;
use std::path::PathBuf;

/// Addressing scheme used to find the version token inside a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Source file with assembly attribute declarations
    SourceDeclaration,
    /// XML project manifest with a `Version` element
    ProjectManifest,
    /// JSON package manifest with a top-level `version` field
    PackageManifest,
}

impl TargetKind {
    /// Get the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            TargetKind::SourceDeclaration => "source declaration",
            TargetKind::ProjectManifest => "project manifest",
            TargetKind::PackageManifest => "package manifest",
        }
    }

    /// Build the rewriter that handles this kind of file
    pub fn rewriter(&self) -> Result<Box<dyn Rewriter>> {
        Ok(match self {
            TargetKind::SourceDeclaration => Box::new(TextRewriter::new()?),
            TargetKind::ProjectManifest => Box::new(MarkupRewriter::default()),
            TargetKind::PackageManifest => Box::new(JsonRewriter::default()),
        })
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One file plus the scheme used to locate its version token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteTarget {
    pub path: PathBuf,
    pub kind: TargetKind,
}

impl RewriteTarget {
    pub fn new(path: impl Into<PathBuf>, kind: TargetKind) -> Self {
        RewriteTarget {
            path: path.into(),
            kind,
        }
    }
}

/// New file content together with the versions it introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Distinct new versions, in the order they appear in the file
    pub versions: Vec<String>,
}

/// Why a file was left alone without being an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No version token found in the file
    NoVersionToken,
    /// The new version equals the current one
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoVersionToken => f.write_str("no version found"),
            SkipReason::Unchanged => f.write_str("version already current"),
        }
    }
}

/// Result of running a rewriter over one file
#[derive(Debug)]
pub enum RewriteOutcome {
    Rewritten(Rewrite),
    Skipped(SkipReason),
    Failed(BumpError),
}

impl RewriteOutcome {
    /// Versions this outcome would contribute to a run
    pub fn versions(&self) -> &[String] {
        match self {
            RewriteOutcome::Rewritten(rewrite) => &rewrite.versions,
            _ => &[],
        }
    }

    pub fn is_rewritten(&self) -> bool {
        matches!(self, RewriteOutcome::Rewritten(_))
    }
}

impl From<Result<Option<Rewrite>>> for RewriteOutcome {
    fn from(result: Result<Option<Rewrite>>) -> Self {
        match result {
            Ok(Some(rewrite)) => RewriteOutcome::Rewritten(rewrite),
            Ok(None) => RewriteOutcome::Skipped(SkipReason::NoVersionToken),
            Err(e) => RewriteOutcome::Failed(e),
        }
    }
}

/// A format-preserving version rewriter for one file format
pub trait Rewriter {
    /// Compute the rewritten content of a file without touching disk
    fn rewrite(&self, content: &str, mode: IncrementMode) -> RewriteOutcome;
}

const UTF8_BOM: char = '\u{feff}';

/// Split a leading byte-order mark off `content`
pub(crate) fn split_bom(content: &str) -> (bool, &str) {
    match content.strip_prefix(UTF8_BOM) {
        Some(rest) => (true, rest),
        None => (false, content),
    }
}
