//! Terminal application layer: the workbench that hosts a session.

pub mod theme;
pub mod workbench;

pub use workbench::Workbench;
