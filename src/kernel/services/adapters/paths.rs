//! Application directory layout.
//!
//! - `$QUILL_HOME` if set, otherwise `~/.quill`
//! - `settings.json`, `mru` and `logs/` live directly under it

use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".quill";
const HOME_OVERRIDE_ENV: &str = "QUILL_HOME";
const LOG_DIR: &str = "logs";
const SETTINGS_FILE: &str = "settings.json";
const MRU_FILE: &str = "mru";

fn app_dir_from(override_dir: Option<String>, home: Option<String>) -> Option<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Some(PathBuf::from(dir));
    }
    home.filter(|h| !h.trim().is_empty())
        .map(|home| PathBuf::from(home).join(APP_DIR))
}

pub fn get_app_dir() -> Option<PathBuf> {
    app_dir_from(
        std::env::var(HOME_OVERRIDE_ENV).ok(),
        std::env::var("HOME").ok(),
    )
}

pub fn get_log_dir(app_dir: &Path) -> PathBuf {
    app_dir.join(LOG_DIR)
}

pub fn settings_path(app_dir: &Path) -> PathBuf {
    app_dir.join(SETTINGS_FILE)
}

pub fn mru_path(app_dir: &Path) -> PathBuf {
    app_dir.join(MRU_FILE)
}

/// Creates the application directory. Failure here is fatal at startup.
pub fn ensure_app_dir() -> io::Result<PathBuf> {
    let dir = get_app_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Cannot determine application directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn ensure_log_dir(app_dir: &Path) -> io::Result<PathBuf> {
    let dir = get_log_dir(app_dir);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
