use super::*;

#[test]
fn test_missing_entry_names_its_position() {
    let err = SessionError::NoSuchEntry(2);
    assert_eq!(err.to_string(), "No open file at position 3");
}

#[test]
fn test_io_error_names_operation_and_path() {
    let err = SessionError::io(
        "save",
        "/work/a.txt",
        FileError::Unencodable {
            path: PathBuf::from("/work/a.txt"),
            encoding: "windows-1252".to_string(),
        },
    );
    assert_eq!(
        err.to_string(),
        "Cannot save /work/a.txt: /work/a.txt cannot be written back as windows-1252"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_not_found_names_the_path() {
    let err = SessionError::NotFound(PathBuf::from("/work/b.txt"));
    assert_eq!(err.to_string(), "/work/b.txt is not open");
}
