use super::*;

#[test]
fn test_dir_entry_hidden_by_leading_dot() {
    let entry = DirEntry {
        path: PathBuf::from("/work/.git"),
        name: ".git".to_string(),
        kind: EntryKind::Dir,
    };
    assert!(entry.is_hidden());

    let entry = DirEntry {
        path: PathBuf::from("/work/src"),
        name: "src".to_string(),
        kind: EntryKind::Dir,
    };
    assert!(!entry.is_hidden());
}

#[test]
fn test_file_error_display_names_the_path() {
    let err = FileError::NotAFile(PathBuf::from("/work/src"));
    assert_eq!(err.to_string(), "Not a file: /work/src");
}

#[test]
fn test_io_error_keeps_source() {
    use std::error::Error;

    let err = FileError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
    assert!(err.source().is_some());
    assert!(err.to_string().contains("denied"));
}
