//! Persisted settings and most-recently-used file list.

use super::paths::{mru_path, settings_path};
use crate::kernel::services::ports::settings::Settings;
use std::io;
use std::path::{Path, PathBuf};

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(app_dir: &Path) -> Settings {
    let path = settings_path(app_dir);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings");
            return Settings::default();
        }
    };

    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings(app_dir: &Path, settings: &Settings) -> io::Result<()> {
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(settings_path(app_dir), content)
}

/// One path per line; blank lines are skipped.
pub fn load_mru(app_dir: &Path) -> Vec<PathBuf> {
    let path = mru_path(app_dir);
    match std::fs::read_to_string(&path) {
        Ok(data) => data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect(),
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to read MRU list");
            }
            Vec::new()
        }
    }
}

pub fn save_mru<'a>(app_dir: &Path, paths: impl IntoIterator<Item = &'a Path>) -> io::Result<()> {
    let mut content = String::new();
    for path in paths {
        content.push_str(&path.to_string_lossy());
        content.push('\n');
    }
    std::fs::write(mru_path(app_dir), content)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
