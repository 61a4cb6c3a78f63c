//! Working-tree status abstraction
//!
//! The [StatusProbe] trait lets the pre-flight checks ask whether the working
//! tree has uncommitted changes without depending on a real repository:
//!
//! - [repository::Git2StatusProbe]: a real implementation using the `git2` crate
//! - [mock::MockStatusProbe]: a fixed answer for tests

pub mod mock;
pub mod repository;

pub use mock::MockStatusProbe;
pub use repository::Git2StatusProbe;

use std::fmt;
use std::path::Path;

/// Cleanliness of the working tree containing the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStatus {
    /// No tracked file has uncommitted changes
    Clean,
    /// At least one tracked file is modified, staged, deleted or renamed
    Dirty,
    /// Status could not be determined (no repository, bare repository, git error)
    Unknown,
}

impl fmt::Display for TreeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeStatus::Clean => f.write_str("clean"),
            TreeStatus::Dirty => f.write_str("dirty"),
            TreeStatus::Unknown => f.write_str("unknown"),
        }
    }
}

/// Reports the status of the working tree containing a directory
///
/// Untracked files never make a tree dirty. Implementations never fail:
/// anything that prevents a definite answer is [TreeStatus::Unknown].
pub trait StatusProbe {
    fn status(&self, root: &Path) -> TreeStatus;
}
