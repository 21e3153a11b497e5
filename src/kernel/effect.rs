use std::path::PathBuf;
use std::time::Duration;

/// Work the host performs off the UI thread on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ProbeVcs(Vec<PathBuf>),
    FocusOpenFile { path: PathBuf, delay: Duration },
    Quit,
}
