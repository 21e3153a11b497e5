use crate::kernel::vcs::VcsSnapshot;
use std::path::PathBuf;

/// Messages delivered to the UI thread. Nothing else touches session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Tick,
    VcsProbed { path: PathBuf, snapshot: VcsSnapshot },
    FocusOpenFile { path: PathBuf },
}
