use std::path::PathBuf;

use crate::kernel::confirm::Decision;
use crate::kernel::vcs::VcsSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenOrSwitch(PathBuf),
    SwitchTo(PathBuf),
    Save,
    SaveAs(PathBuf),
    /// New temporary file in the current workspace.
    NewFile,
    NewOrResumeLast(PathBuf),
    CloseCurrent,
    Next,
    Previous,
    CheckAllForSaveOnQuit,
    Confirm(Decision),
    ExplorerActivate,
    ExplorerMoveSelection { delta: isize },
    ExplorerSetViewHeight { height: usize },
    ToggleHidden,
    Tick,
    VcsProbed { path: PathBuf, snapshot: VcsSnapshot },
    Edit(EditorAction),
}

/// Edits applied to the current buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    InsertChar(char),
    InsertNewline,
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    LineStart,
    LineEnd,
}
