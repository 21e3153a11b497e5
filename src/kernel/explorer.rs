//! Directory tree projector.
//!
//! The root's children are listed when the tree is rendered; deeper directories are
//! listed the first time they are expanded.

use crate::kernel::error::{Result, SessionError};
use crate::kernel::services::ports::{EntryKind, FileProvider};
use crate::models::{FileTree, FileTreeRow, LoadState, NodeId, NodeKind};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// MIME strings shorter than this cannot be classified.
const MIN_MIME_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Nothing,
    Toggled,
    Open(PathBuf),
    Rejected(String),
}

pub struct Explorer {
    tree: FileTree,
    rows: Vec<FileTreeRow>,
    index_by_id: FxHashMap<NodeId, usize>,
    show_hidden: bool,
    pub view_height: usize,
    pub scroll_offset: usize,
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("root", &self.tree.absolute_root())
            .field("rows_len", &self.rows.len())
            .field("selected", &self.tree.selected())
            .field("show_hidden", &self.show_hidden)
            .finish()
    }
}

impl Explorer {
    /// An unlisted tree; call [`Explorer::render`] to populate it.
    pub fn new(root: PathBuf, show_hidden: bool) -> Self {
        let mut explorer = Self {
            tree: FileTree::new_with_root(root),
            rows: Vec::new(),
            index_by_id: FxHashMap::default(),
            show_hidden,
            view_height: 10,
            scroll_offset: 0,
        };
        explorer.refresh_rows();
        explorer
    }

    pub fn root(&self) -> &Path {
        self.tree.absolute_root()
    }

    pub fn rows(&self) -> &[FileTreeRow] {
        &self.rows
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.tree
            .selected()
            .and_then(|id| self.index_by_id.get(&id).copied())
    }

    pub fn full_path(&mut self, id: NodeId) -> PathBuf {
        self.tree.full_path(id)
    }

    /// Resets the tree to a single root and lists its immediate children.
    pub fn render(&mut self, root: &Path, show_hidden: bool, files: &dyn FileProvider) -> Result<()> {
        self.tree = FileTree::new_with_root(root.to_path_buf());
        self.show_hidden = show_hidden;
        self.scroll_offset = 0;

        let root_id = self.tree.root();
        let result = self.load_children(root_id, files);
        self.refresh_rows();
        tracing::debug!(root = %root.display(), rows = self.rows.len(), "explorer rendered");
        result
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool, files: &dyn FileProvider) -> Result<()> {
        let root = self.root().to_path_buf();
        self.render(&root, show_hidden, files)
    }

    /// Lists the node on first use, toggles it afterwards.
    pub fn expand_node(&mut self, id: NodeId, files: &dyn FileProvider) -> Result<bool> {
        if !self.tree.kind(id).is_some_and(NodeKind::is_expandable) {
            return Ok(false);
        }

        if self.tree.load_state(id) == Some(LoadState::NotLoaded) {
            let result = self.load_children(id, files);
            self.tree.expand(id);
            self.refresh_rows();
            result?;
        } else {
            self.tree.toggle_expand(id);
            self.refresh_rows();
        }
        Ok(true)
    }

    pub fn activate_selected(&mut self, files: &dyn FileProvider) -> Activation {
        let Some(id) = self.tree.selected() else {
            return Activation::Nothing;
        };
        let Some(kind) = self.tree.kind(id) else {
            return Activation::Nothing;
        };

        if kind.is_expandable() {
            return match self.expand_node(id, files) {
                Ok(true) => Activation::Toggled,
                Ok(false) => Activation::Nothing,
                Err(e) => Activation::Rejected(e.to_string()),
            };
        }

        let path = self.tree.full_path(id);
        if matches!(kind, NodeKind::Symlink { .. }) {
            return Activation::Rejected(format!(
                "{} is a symbolic link, not opened",
                path.display()
            ));
        }

        match files.mime_type(&path) {
            Err(e) => Activation::Rejected(format!("Can't open file {}: {}", path.display(), e)),
            Ok(mime) if mime.len() < MIN_MIME_LEN => Activation::Rejected(format!(
                "Can't open file {} of type {}",
                path.display(),
                mime
            )),
            Ok(mime) if mime.starts_with("text") => Activation::Open(path),
            Ok(mime) => Activation::Rejected(format!(
                "{} is not a text file ({})",
                path.display(),
                mime
            )),
        }
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() || delta == 0 {
            return false;
        }

        let Some(current_index) = self.selected_index() else {
            let new_index = if delta < 0 { self.rows.len() - 1 } else { 0 };
            self.tree.set_selected(Some(self.rows[new_index].id));
            self.keep_row_visible(new_index);
            return true;
        };

        let new_index = if delta < 0 {
            current_index.saturating_sub(delta.unsigned_abs())
        } else {
            (current_index + delta as usize).min(self.rows.len() - 1)
        };

        if new_index == current_index {
            return false;
        }

        self.tree.set_selected(Some(self.rows[new_index].id));
        self.keep_row_visible(new_index);
        true
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        if let Some(index) = self.selected_index() {
            self.keep_row_visible(index);
        }
        true
    }

    fn keep_row_visible(&mut self, index: usize) {
        let height = self.view_height.max(1);
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + height {
            self.scroll_offset = index + 1 - height;
        }
    }

    fn load_children(&mut self, id: NodeId, files: &dyn FileProvider) -> Result<()> {
        let path = self.tree.full_path(id);
        let entries = files
            .read_dir(&path)
            .map_err(|e| SessionError::io("list", &path, e))?;

        for entry in entries {
            if entry.is_hidden() && !self.show_hidden {
                continue;
            }
            let kind = match entry.kind {
                EntryKind::File => NodeKind::File,
                EntryKind::Dir => NodeKind::Dir,
                EntryKind::Symlink { target_is_dir } => NodeKind::Symlink { target_is_dir },
            };
            if let Err(e) = self.tree.insert_child(id, entry.name.into(), kind) {
                tracing::debug!(dir = %path.display(), error = %e, "skipping tree entry");
            }
        }
        self.tree.set_load_state(id, LoadState::Loaded);
        Ok(())
    }

    fn refresh_rows(&mut self) {
        self.rows = self.tree.flatten_for_view();
        self.index_by_id = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.id, i))
            .collect();
        if self.selected_index().is_none() {
            self.tree.set_selected(Some(self.tree.root()));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/explorer.rs"]
mod tests;
