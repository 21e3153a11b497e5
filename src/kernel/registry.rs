//! Open-file registry.
//!
//! Entries keep insertion order, which is the display order of the open-files list. A
//! path index backs `is_open` so duplicate detection does not scan every entry.

use crate::kernel::error::{Result, SessionError};
use crate::kernel::services::ports::{FileProvider, TextEncoding};
use crate::kernel::vcs::VcsSnapshot;
use crate::models::TextBuffer;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileEntry {
    path: PathBuf,
    buffer: TextBuffer,
    encoding: TextEncoding,
    vcs: VcsSnapshot,
}

impl FileEntry {
    pub fn new(path: PathBuf, buffer: TextBuffer, encoding: TextEncoding) -> Self {
        Self {
            path,
            buffer,
            encoding,
            vcs: VcsSnapshot::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Label shown in the status bar.
    pub fn encoding(&self) -> &str {
        &self.encoding.label
    }

    pub fn text_encoding(&self) -> &TextEncoding {
        &self.encoding
    }

    pub fn vcs(&self) -> &VcsSnapshot {
        &self.vcs
    }

    pub fn set_vcs(&mut self, snapshot: VcsSnapshot) {
        self.vcs = snapshot;
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened(usize),
    /// Nothing changed; the caller is expected to switch to it.
    AlreadyOpen(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    NotOpen,
    NeedsConfirmation(usize),
    Removed(Removal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub index: usize,
    pub was_current: bool,
    /// Directory of the removed file, where a replacement gets created.
    pub dir: PathBuf,
    /// No entry precedes the removed current one, or nothing is left.
    pub needs_replacement: bool,
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<FileEntry>,
    current: Option<usize>,
    by_path: FxHashMap<PathBuf, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FileEntry> {
        self.entries.get_mut(index)
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    pub fn entry_mut_by_path(&mut self, path: &Path) -> Option<&mut FileEntry> {
        let index = self.index_of(path)?;
        self.entries.get_mut(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut FileEntry> {
        self.current.and_then(|i| self.entries.get_mut(i))
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current().map(FileEntry::path)
    }

    /// Reads and decodes `path`, appends it and makes it current.
    pub fn open(&mut self, path: &Path, files: &dyn FileProvider) -> Result<OpenOutcome> {
        if let Some(index) = self.index_of(path) {
            return Ok(OpenOutcome::AlreadyOpen(index));
        }

        let decoded = files
            .read_text(path)
            .map_err(|e| SessionError::io("open", path, e))?;
        let entry = FileEntry::new(
            path.to_path_buf(),
            TextBuffer::from_text(&decoded.content),
            decoded.encoding,
        );
        Ok(OpenOutcome::Opened(self.push(entry)))
    }

    /// Appends an entry and makes it current. The path must not be open yet.
    pub fn push(&mut self, entry: FileEntry) -> usize {
        debug_assert!(!self.is_open(entry.path()));
        let index = self.entries.len();
        self.by_path.insert(entry.path.clone(), index);
        self.entries.push(entry);
        self.current = Some(index);
        index
    }

    pub fn switch_to(&mut self, path: &Path) -> Result<usize> {
        let index = self
            .index_of(path)
            .ok_or_else(|| SessionError::NotFound(path.to_path_buf()))?;
        self.current = Some(index);
        Ok(index)
    }

    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Removes the entry for `path` unless its buffer has unsaved changes.
    pub fn close(&mut self, path: &Path) -> CloseOutcome {
        let Some(index) = self.index_of(path) else {
            return CloseOutcome::NotOpen;
        };
        if self.entries[index].is_modified() {
            return CloseOutcome::NeedsConfirmation(index);
        }
        match self.remove_at(index) {
            Some(removal) => CloseOutcome::Removed(removal),
            None => CloseOutcome::NotOpen,
        }
    }

    /// Removes an entry regardless of its modified flag.
    pub fn remove_at(&mut self, index: usize) -> Option<Removal> {
        if index >= self.entries.len() {
            return None;
        }

        let entry = self.entries.remove(index);
        self.by_path.remove(entry.path());
        for (i, e) in self.entries.iter().enumerate().skip(index) {
            self.by_path.insert(e.path.clone(), i);
        }

        let was_current = self.current == Some(index);
        let mut needs_replacement = self.entries.is_empty();
        self.current = match self.current {
            _ if self.entries.is_empty() => None,
            Some(cur) if cur == index && index > 0 => Some(index - 1),
            Some(cur) if cur == index => {
                needs_replacement = true;
                Some(0)
            }
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };

        Some(Removal {
            index,
            was_current,
            dir: entry.directory().to_path_buf(),
            needs_replacement,
        })
    }

    /// Moves `current` forward, wrapping at the end.
    pub fn next(&mut self) -> Option<usize> {
        let len = self.entries.len();
        let cur = self.current?;
        self.current = Some((cur + 1) % len);
        self.current
    }

    /// Moves `current` backward, wrapping at the start.
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.entries.len();
        let cur = self.current?;
        self.current = Some((cur + len - 1) % len);
        self.current
    }

    pub fn any_modified(&self) -> bool {
        self.entries.iter().any(FileEntry::is_modified)
    }

    pub fn first_modified(&self) -> Option<usize> {
        self.entries.iter().position(FileEntry::is_modified)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(FileEntry::path)
    }
}

/// Joins relative paths onto the working directory. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/registry.rs"]
mod tests;
