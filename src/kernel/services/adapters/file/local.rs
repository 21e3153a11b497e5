//! Local filesystem provider.

use super::{decode_text, encode_text};
use super::sniff::SNIFF_LEN;
use crate::kernel::services::ports::file::{
    DecodedText, DirEntry, EntryKind, FileError, FileProvider, Result, TextEncoding,
};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
const PRIVATE_FILE_MODE: u32 = 0o600;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for LocalFileProvider {
    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        Ok(fs::read(path)?)
    }

    fn read_text(&self, path: &Path) -> Result<DecodedText> {
        let bytes = self.read_file_bytes(path)?;
        Ok(decode_text(&bytes))
    }

    fn write_text_private(
        &self,
        path: &Path,
        content: &str,
        encoding: &TextEncoding,
    ) -> Result<()> {
        let bytes = encode_text(content, encoding).ok_or_else(|| FileError::Unencodable {
            path: path.to_path_buf(),
            encoding: encoding.label.clone(),
        })?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(PRIVATE_FILE_MODE);
        }

        let mut file = options.open(path)?;
        // The open mode only applies to newly created files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
        }
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(())
    }

    fn create_temp_file(&self, dir: &Path, prefix: &str) -> Result<PathBuf> {
        if !dir.is_dir() {
            return Err(FileError::NotADirectory(dir.to_path_buf()));
        }
        let temp = tempfile::Builder::new().prefix(prefix).tempfile_in(dir)?;
        let (_file, path) = temp.keep().map_err(|e| FileError::Io(e.error))?;
        Ok(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.is_dir() {
            return Err(FileError::NotADirectory(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;

            let kind = if file_type.is_symlink() {
                // A dangling link is listed as a link to a file.
                let target_is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
                EntryKind::Symlink { target_is_dir }
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path,
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn mime_type(&self, path: &Path) -> Result<String> {
        let file = fs::File::open(path)?;
        let mut head = Vec::with_capacity(SNIFF_LEN);
        file.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
        Ok(super::sniff_mime(&head).into_owned())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
