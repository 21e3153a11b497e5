//! Service ports: traits + data contracts.

pub mod config;
pub mod file;
pub mod settings;
pub mod vcs;

pub use config::SessionConfig;
pub use file::{
    DecodedText, DirEntry, EntryKind, FileError, FileProvider, Result as FileResult, TextEncoding,
};
pub use settings::{CursorSettings, Settings};
pub use vcs::{ProcessOutput, ProcessRunner, VcsProbe};
