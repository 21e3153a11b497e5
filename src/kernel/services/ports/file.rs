//! Filesystem port.
//!
//! Every call opens, uses and closes its own handle; nothing is held open between calls.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    NotAFile(PathBuf),
    NotADirectory(PathBuf),
    /// The text cannot be written back in the encoding the file was read as.
    Unencodable { path: PathBuf, encoding: String },
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
            FileError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            FileError::Unencodable { path, encoding } => write!(
                f,
                "{} cannot be written back as {}",
                path.display(),
                encoding
            ),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink { target_is_dir: bool },
}

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// How a file's bytes map to text. Saving encodes back to the same form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEncoding {
    /// Encoding label, e.g. `UTF-8`, `UTF-16LE`, `windows-1252` or `Unknown`.
    pub label: String,
    /// The file started with a byte-order mark.
    pub bom: bool,
    /// Decoding replaced bytes it could not map, so the text no longer matches the file.
    pub lossy: bool,
}

impl TextEncoding {
    pub fn utf8() -> Self {
        Self {
            label: "UTF-8".to_string(),
            bom: false,
            lossy: false,
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

/// File content decoded for editing, with the encoding it was read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    pub encoding: TextEncoding,
}

pub trait FileProvider: Send + Sync {
    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Reads and decodes a file. An undetectable encoding is labelled `Unknown`, never an error.
    fn read_text(&self, path: &Path) -> Result<DecodedText>;

    /// Creates or truncates `path` with owner-only permissions and writes `content` in
    /// `encoding`. Lossy or unrepresentable text fails with `Unencodable` and leaves the
    /// file untouched.
    fn write_text_private(&self, path: &Path, content: &str, encoding: &TextEncoding)
        -> Result<()>;

    /// Creates a uniquely named empty file in `dir` whose name starts with `prefix`.
    /// The file stays on disk.
    fn create_temp_file(&self, dir: &Path, prefix: &str) -> Result<PathBuf>;

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Content-sniffed MIME type, e.g. `text/plain; charset=utf-8`.
    fn mime_type(&self, path: &Path) -> Result<String>;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
