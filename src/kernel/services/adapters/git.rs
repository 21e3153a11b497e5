//! `git` CLI prober.
//!
//! One process per query. A missing binary, a directory outside any repository, or any
//! other failure yields the sentinel value for that query.

use crate::kernel::services::ports::vcs::{ProcessOutput, ProcessRunner, VcsProbe};
use crate::kernel::vcs::{FileStatusCode, WorktreeStatus, NO_VCS_COMMIT, UNKNOWN_BRANCH};
use std::path::Path;

const GIT: &str = "git";

pub struct GitProbe<R: ProcessRunner> {
    runner: R,
}

impl<R: ProcessRunner> GitProbe<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn git(&self, dir: &Path, args: &[&str]) -> Option<ProcessOutput> {
        match self.runner.run(dir, GIT, args) {
            Ok(output) if output.success => Some(output),
            Ok(output) => {
                tracing::trace!(
                    dir = %dir.display(),
                    ?args,
                    stderr = %output.stderr.trim(),
                    "git query failed"
                );
                None
            }
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "git could not be spawned");
                None
            }
        }
    }
}

impl<R: ProcessRunner> VcsProbe for GitProbe<R> {
    fn commit(&self, dir: &Path) -> String {
        self.git(dir, &["rev-parse", "--short", "HEAD"])
            .filter(|out| out.stderr.trim().is_empty())
            .and_then(|out| first_token(&out.stdout))
            .unwrap_or_else(|| NO_VCS_COMMIT.to_string())
    }

    fn branch(&self, dir: &Path) -> String {
        self.git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])
            .and_then(|out| first_token(&out.stdout))
            .unwrap_or_else(|| UNKNOWN_BRANCH.to_string())
    }

    fn working_tree_status(&self, dir: &Path) -> WorktreeStatus {
        match self.git(dir, &["status", "-s"]) {
            Some(out) if !out.stdout.trim().is_empty() => WorktreeStatus::PendingCommit,
            _ => WorktreeStatus::UpToDate,
        }
    }

    fn file_status(&self, dir: &Path, path: &Path) -> FileStatusCode {
        let path = path.to_string_lossy();
        self.git(dir, &["status", "-s", "--", path.as_ref()])
            .and_then(|out| out.stdout.lines().next().map(FileStatusCode::from_status_line))
            .unwrap_or(FileStatusCode::CLEAN)
    }
}

fn first_token(stdout: &str) -> Option<String> {
    let line = stdout.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/git.rs"]
mod tests;
