use crate::kernel::services::ports::FileError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SessionError {
    Io {
        op: &'static str,
        path: PathBuf,
        source: FileError,
    },
    NotFound(PathBuf),
    /// An entry index that no longer exists in the registry.
    NoSuchEntry(usize),
    ConfirmationPending,
    PathInUse(PathBuf),
}

impl SessionError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: FileError) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io { op, path, source } => {
                write!(f, "Cannot {} {}: {}", op, path.display(), source)
            }
            SessionError::NotFound(p) => write!(f, "{} is not open", p.display()),
            SessionError::NoSuchEntry(index) => {
                write!(f, "No open file at position {}", index + 1)
            }
            SessionError::ConfirmationPending => {
                write!(f, "Answer the pending save prompt first")
            }
            SessionError::PathInUse(p) => {
                write!(f, "{} is already open in another buffer", p.display())
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
#[path = "../../tests/unit/kernel/error.rs"]
mod tests;
