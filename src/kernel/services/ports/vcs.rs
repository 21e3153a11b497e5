//! Version-control and process ports.

use crate::kernel::vcs::{FileStatusCode, VcsSnapshot, WorktreeStatus};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs an external program to completion in `dir`. Blocking.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> io::Result<ProcessOutput>;
}

/// Read-only version-control queries. Implementations degrade to the sentinel values of
/// [`VcsSnapshot::default`] instead of failing.
pub trait VcsProbe: Send + Sync {
    fn commit(&self, dir: &Path) -> String;

    fn branch(&self, dir: &Path) -> String;

    fn working_tree_status(&self, dir: &Path) -> WorktreeStatus;

    fn file_status(&self, dir: &Path, path: &Path) -> FileStatusCode;

    /// Queries everything for `path`, using its parent directory as the working directory.
    fn snapshot(&self, path: &Path) -> VcsSnapshot {
        let dir = path.parent().unwrap_or(path);
        VcsSnapshot {
            commit: self.commit(dir),
            branch: self.branch(dir),
            worktree: self.working_tree_status(dir),
            file_status: self.file_status(dir, path),
        }
    }
}
