//! Version-control snapshot types.
//!
//! A repository that cannot be queried is not an error: every field has a sentinel
//! that the status bar shows as-is.

use std::fmt;

pub const NO_VCS_COMMIT: &str = "No GIT";
pub const UNKNOWN_BRANCH: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorktreeStatus {
    PendingCommit,
    #[default]
    UpToDate,
}

impl WorktreeStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::PendingCommit => "Pending Commit",
            Self::UpToDate => "Up to date",
        }
    }
}

impl fmt::Display for WorktreeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatusKind {
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
    Conflict,
}

impl FileStatusKind {
    pub fn marker(self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Untracked => '?',
            Self::Conflict => 'U',
        }
    }
}

/// Two-column short status (`XY`) of a single file. Blank means clean or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatusCode {
    index: char,
    worktree: char,
}

impl FileStatusCode {
    pub const CLEAN: Self = Self {
        index: ' ',
        worktree: ' ',
    };

    pub fn new(index: char, worktree: char) -> Self {
        Self { index, worktree }
    }

    /// Takes the first two characters of a short-status line. Anything shorter is clean.
    pub fn from_status_line(line: &str) -> Self {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(x), Some(y)) => Self::new(x, y),
            _ => Self::CLEAN,
        }
    }

    pub fn is_clean(self) -> bool {
        self == Self::CLEAN
    }

    pub fn kind(self) -> Option<FileStatusKind> {
        let (x, y) = (self.index, self.worktree);
        if x == 'U' || y == 'U' || (x == 'A' && y == 'A') || (x == 'D' && y == 'D') {
            return Some(FileStatusKind::Conflict);
        }
        if x == '?' && y == '?' {
            return Some(FileStatusKind::Untracked);
        }
        kind_from_status_char(y).or_else(|| kind_from_status_char(x))
    }
}

impl Default for FileStatusCode {
    fn default() -> Self {
        Self::CLEAN
    }
}

impl fmt::Display for FileStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.index, self.worktree)
    }
}

fn kind_from_status_char(ch: char) -> Option<FileStatusKind> {
    match ch {
        ' ' | '!' => None,
        '?' => Some(FileStatusKind::Untracked),
        'A' => Some(FileStatusKind::Added),
        'D' => Some(FileStatusKind::Deleted),
        'R' | 'C' => Some(FileStatusKind::Renamed),
        'U' => Some(FileStatusKind::Conflict),
        _ => Some(FileStatusKind::Modified),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsSnapshot {
    pub commit: String,
    pub branch: String,
    pub worktree: WorktreeStatus,
    pub file_status: FileStatusCode,
}

impl Default for VcsSnapshot {
    fn default() -> Self {
        Self {
            commit: NO_VCS_COMMIT.to_string(),
            branch: UNKNOWN_BRANCH.to_string(),
            worktree: WorktreeStatus::UpToDate,
            file_status: FileStatusCode::CLEAN,
        }
    }
}

impl VcsSnapshot {
    pub fn is_repository(&self) -> bool {
        self.commit != NO_VCS_COMMIT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/vcs.rs"]
mod tests;
