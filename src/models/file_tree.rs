//! Directory tree model.
//!
//! Nodes live in a slotmap arena. Directory children are loaded lazily, so a node
//! starts `NotLoaded` and only becomes `Loaded` once its listing has been inserted.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::{
    collections::{BTreeMap, HashMap},
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
    /// `target_is_dir` decides whether the link can be expanded like a directory.
    Symlink { target_is_dir: bool },
}

impl NodeKind {
    pub fn is_expandable(self) -> bool {
        matches!(
            self,
            NodeKind::Dir
                | NodeKind::Symlink {
                    target_is_dir: true
                }
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
}

#[derive(Debug)]
pub enum FileTreeError {
    ParentNotDirectory,
    NameExists,
    InvalidNodeId,
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::ParentNotDirectory => write!(f, "parent is not a directory"),
            FileTreeError::NameExists => write!(f, "name already exists in parent"),
            FileTreeError::InvalidNodeId => write!(f, "invalid node id"),
        }
    }
}

impl std::error::Error for FileTreeError {}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: OsString,
    parent: Option<NodeId>,
    children: Option<BTreeMap<OsString, NodeId>>,
    load_state: LoadState,
}

impl Node {
    fn new(kind: NodeKind, name: OsString, parent: Option<NodeId>) -> Self {
        let (children, load_state) = if kind.is_expandable() {
            (Some(BTreeMap::new()), LoadState::NotLoaded)
        } else {
            (None, LoadState::Loaded)
        };
        Self {
            kind,
            name,
            parent,
            children,
            load_state,
        }
    }
}

pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    expanded: FxHashSet<NodeId>,
    selected: Option<NodeId>,
    absolute_root: PathBuf,
    path_cache: HashMap<NodeId, PathBuf>,
}

impl FileTree {
    /// The root node is labelled with the full root path and starts expanded.
    pub fn new_with_root(absolute_root: PathBuf) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new(
            NodeKind::Dir,
            absolute_root.clone().into_os_string(),
            None,
        ));

        let mut expanded = FxHashSet::default();
        expanded.insert(root);

        Self {
            arena,
            root,
            expanded,
            selected: Some(root),
            absolute_root,
            path_cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    pub fn absolute_root(&self) -> &Path {
        &self.absolute_root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn load_state(&self, id: NodeId) -> Option<LoadState> {
        self.arena.get(id).map(|n| n.load_state)
    }

    pub fn set_load_state(&mut self, id: NodeId, state: LoadState) {
        if let Some(node) = self.arena.get_mut(id) {
            node.load_state = state;
        }
    }

    pub fn insert_child(
        &mut self,
        parent: NodeId,
        name: OsString,
        kind: NodeKind,
    ) -> Result<NodeId, FileTreeError> {
        {
            let parent_ro = self.arena.get(parent).ok_or(FileTreeError::InvalidNodeId)?;
            let children_ro = parent_ro
                .children
                .as_ref()
                .ok_or(FileTreeError::ParentNotDirectory)?;
            if children_ro.contains_key(&name) {
                return Err(FileTreeError::NameExists);
            }
        }

        let id = self.arena.insert(Node::new(kind, name.clone(), Some(parent)));

        let children = self
            .arena
            .get_mut(parent)
            .ok_or(FileTreeError::InvalidNodeId)?
            .children
            .as_mut()
            .ok_or(FileTreeError::ParentNotDirectory)?;
        children.insert(name, id);

        Ok(id)
    }

    pub fn full_path(&mut self, id: NodeId) -> PathBuf {
        if id == self.root {
            return self.absolute_root.clone();
        }

        if let Some(cached_path) = self.path_cache.get(&id) {
            return cached_path.clone();
        }

        let mut components = vec![];
        let mut current = id;
        while let Some(node) = self.arena.get(current) {
            match node.parent {
                Some(parent) => {
                    components.push(node.name.as_os_str());
                    current = parent;
                }
                None => break,
            }
        }

        let mut path = self.absolute_root.clone();
        for comp in components.iter().rev() {
            path.push(comp);
        }

        self.path_cache.insert(id, path.clone());
        path
    }

    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.kind(id).is_some_and(NodeKind::is_expandable) {
            if self.expanded.contains(&id) {
                self.expanded.remove(&id);
            } else {
                self.expanded.insert(id);
            }
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        if self.kind(id).is_some_and(NodeKind::is_expandable) {
            self.expanded.insert(id);
        }
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.arena.get(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.kind(id) == Some(NodeKind::Dir)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }
}

#[derive(Debug, Clone)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: OsString,
    pub kind: NodeKind,
    pub is_expanded: bool,
    pub load_state: LoadState,
}

impl FileTree {
    /// Visible rows in display order: root first, then expandable entries before files.
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            result.push(FileTreeRow {
                id,
                depth,
                name: node.name.clone(),
                kind: node.kind,
                is_expanded: self.expanded.contains(&id),
                load_state: node.load_state,
            });

            if !self.expanded.contains(&id) {
                continue;
            }
            let Some(children) = &node.children else {
                continue;
            };

            let mut dirs = Vec::new();
            let mut files = Vec::new();
            for &child_id in children.values() {
                if let Some(child) = self.arena.get(child_id) {
                    if child.kind.is_expandable() {
                        dirs.push(child_id);
                    } else {
                        files.push(child_id);
                    }
                }
            }

            for file_id in files.into_iter().rev() {
                stack.push((file_id, depth + 1));
            }
            for dir_id in dirs.into_iter().rev() {
                stack.push((dir_id, depth + 1));
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
