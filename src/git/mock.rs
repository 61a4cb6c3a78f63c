use crate::git::{StatusProbe, TreeStatus};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Mock probe for testing without a repository
pub struct MockStatusProbe {
    status: TreeStatus,
    queried: RefCell<Vec<PathBuf>>,
}

impl MockStatusProbe {
    /// Create a probe that always answers `status`
    pub fn new(status: TreeStatus) -> Self {
        MockStatusProbe {
            status,
            queried: RefCell::new(Vec::new()),
        }
    }

    /// Roots the probe has been asked about, in order
    pub fn queried(&self) -> Vec<PathBuf> {
        self.queried.borrow().clone()
    }
}

impl Default for MockStatusProbe {
    fn default() -> Self {
        Self::new(TreeStatus::Clean)
    }
}

impl StatusProbe for MockStatusProbe {
    fn status(&self, root: &Path) -> TreeStatus {
        self.queried.borrow_mut().push(root.to_path_buf());
        self.status
    }
}
