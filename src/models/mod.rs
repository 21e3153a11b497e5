//! Pure data models shared by the kernel and the UI.

pub mod file_tree;
pub mod text_buffer;

pub use file_tree::{FileTree, FileTreeError, FileTreeRow, LoadState, NodeId, NodeKind};
pub use text_buffer::{slice_to_cow, TextBuffer};
