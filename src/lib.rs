//! quill - terminal text editor library
//!
//! Module layout:
//! - models: pure data (TextBuffer, FileTree)
//! - kernel: headless session core (registry, confirmation, explorer, refresh) and services
//! - tui / app: terminal frontend (feature `tui`)

pub mod kernel;
pub mod models;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
