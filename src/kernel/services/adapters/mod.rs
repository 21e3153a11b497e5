//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod file;
pub mod git;
pub mod paths;
pub mod process;
pub mod runtime;
pub mod settings;

pub use file::LocalFileProvider;
pub use git::GitProbe;
pub use paths::{ensure_app_dir, ensure_log_dir, get_app_dir, get_log_dir};
pub use process::SystemProcessRunner;
pub use runtime::{AppMessage, AsyncRuntime, RefreshLoop};
pub use settings::{load_mru, load_settings, save_mru, save_settings};
