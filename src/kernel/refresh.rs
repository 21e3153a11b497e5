//! Status view computed on every refresh tick, and the VCS probe throttle.

use crate::kernel::registry::Registry;
use crate::kernel::vcs::{FileStatusCode, VcsSnapshot};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFileRow {
    pub modified: bool,
    pub name: String,
    pub path: PathBuf,
    pub vcs_code: FileStatusCode,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub file_name: String,
    pub directory: PathBuf,
    pub path: PathBuf,
    pub modified: bool,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
    pub percent: usize,
    pub encoding: String,
    pub vcs: VcsSnapshot,
    pub rows: Vec<OpenFileRow>,
}

/// Truncating percentage of the 0-based cursor line over the line count.
pub fn scroll_percent(cursor_line: usize, total_lines: usize) -> usize {
    if total_lines == 0 {
        return 0;
    }
    cursor_line.saturating_mul(100) / total_lines
}

pub fn build_status_view(registry: &Registry) -> StatusView {
    let current = registry.current_index();
    let rows = registry
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| OpenFileRow {
            modified: entry.is_modified(),
            name: entry.file_name(),
            path: entry.path().to_path_buf(),
            vcs_code: entry.vcs().file_status,
            is_current: Some(i) == current,
        })
        .collect();

    let Some(entry) = registry.current() else {
        return StatusView {
            rows,
            ..StatusView::default()
        };
    };

    let (line, column) = entry.buffer().cursor();
    StatusView {
        file_name: entry.file_name(),
        directory: entry.directory().to_path_buf(),
        path: entry.path().to_path_buf(),
        modified: entry.is_modified(),
        line: line + 1,
        column: column + 1,
        percent: scroll_percent(line, entry.buffer().len_lines()),
        encoding: entry.encoding().to_string(),
        vcs: entry.vcs().clone(),
        rows,
    }
}

/// Counts ticks; every `every`-th one is a full refresh.
#[derive(Debug, Clone)]
pub struct RefreshThrottle {
    ticks: u64,
    every: u64,
}

impl RefreshThrottle {
    pub fn new(every: u64) -> Self {
        Self {
            ticks: 0,
            every: every.max(1),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances one tick and reports whether all entries are due for a probe.
    pub fn advance(&mut self) -> bool {
        self.ticks = self.ticks.wrapping_add(1);
        self.ticks % self.every == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/refresh.rs"]
mod tests;
