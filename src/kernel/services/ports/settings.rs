use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_NEW_FILE_PREFIX: &str = "quill_";
pub const DEFAULT_THEME: &str = "monokai";

/// Persisted user settings (`settings.json`). Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file: Option<PathBuf>,
    pub cursor: CursorSettings,
    pub theme: String,
    pub show_hidden: bool,
    pub confirm_exit: bool,
    pub new_file_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace: None,
            last_file: None,
            cursor: CursorSettings::default(),
            theme: DEFAULT_THEME.to_string(),
            show_hidden: false,
            confirm_exit: true,
            new_file_prefix: DEFAULT_NEW_FILE_PREFIX.to_string(),
        }
    }
}

/// 1-based cursor position of `last_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    pub line: usize,
    pub column: usize,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl CursorSettings {
    pub fn from_zero_based(pos: (usize, usize)) -> Self {
        Self {
            line: pos.0 + 1,
            column: pos.1 + 1,
        }
    }

    pub fn to_zero_based(self) -> (usize, usize) {
        (self.line.saturating_sub(1), self.column.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
