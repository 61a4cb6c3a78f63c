use crate::error::Result;
use crate::git::{StatusProbe, TreeStatus};
use git2::{Repository as Git2Repo, StatusOptions};
use std::path::Path;

/// Status probe backed by the repository discovered from the project root
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2StatusProbe;

impl Git2StatusProbe {
    /// Count tracked entries with uncommitted changes
    pub fn changed_entries(&self, root: &Path) -> Result<usize> {
        let repo = Git2Repo::discover(root)?;

        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = repo.statuses(Some(&mut options))?;
        Ok(statuses.len())
    }
}

impl StatusProbe for Git2StatusProbe {
    fn status(&self, root: &Path) -> TreeStatus {
        match self.changed_entries(root) {
            Ok(0) => TreeStatus::Clean,
            Ok(count) => {
                tracing::debug!(count, "tracked files with uncommitted changes");
                TreeStatus::Dirty
            }
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "cannot read git status");
                TreeStatus::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn commit_all(repo: &Git2Repo, message: &str) {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let parents: Vec<git2::Commit> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap();
    }

    #[test]
    fn test_outside_repository_is_unknown() {
        let dir = TempDir::new().unwrap();
        // A temp dir may itself live inside a repository; only assert when it does not
        if Git2Repo::discover(dir.path()).is_err() {
            assert_eq!(Git2StatusProbe.status(dir.path()), TreeStatus::Unknown);
        }
    }

    #[test]
    fn test_clean_dirty_and_untracked() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("App.csproj"), "<Project />").unwrap();
        commit_all(&repo, "Initial commit");

        assert_eq!(Git2StatusProbe.status(dir.path()), TreeStatus::Clean);

        fs::write(dir.path().join("notes.txt"), "untracked").unwrap();
        assert_eq!(Git2StatusProbe.status(dir.path()), TreeStatus::Clean);

        fs::write(dir.path().join("App.csproj"), "<Project></Project>").unwrap();
        assert_eq!(Git2StatusProbe.status(dir.path()), TreeStatus::Dirty);
    }

    #[test]
    fn test_subdirectory_sees_whole_repository() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        commit_all(&repo, "Initial commit");

        fs::write(dir.path().join("b.txt"), "changed").unwrap();
        assert_eq!(
            Git2StatusProbe.status(&dir.path().join("src")),
            TreeStatus::Dirty
        );
    }
}
