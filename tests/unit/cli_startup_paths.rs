use tempfile::tempdir;

#[test]
fn resolve_startup_paths_defaults_to_cwd() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let startup = super::resolve_startup_paths(cwd, None).unwrap();
    assert_eq!(startup.workspace, cwd);
    assert!(startup.open_file.is_none());
}

#[test]
fn resolve_startup_paths_accepts_directory_arg() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let workspace = cwd.join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();

    let startup = super::resolve_startup_paths(cwd, Some("workspace")).unwrap();
    assert_eq!(startup.workspace, workspace);
    assert!(startup.open_file.is_none());
}

#[test]
fn resolve_startup_paths_uses_file_directory_as_workspace() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let workspace = cwd.join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();
    let file = workspace.join("a.txt");
    std::fs::write(&file, "hello\n").unwrap();

    let startup = super::resolve_startup_paths(cwd, Some("workspace/a.txt")).unwrap();
    assert_eq!(startup.workspace, workspace);
    assert_eq!(startup.open_file, Some(file.clone()));
    assert_eq!(std::fs::read_to_string(file).unwrap(), "hello\n");
}

#[test]
fn resolve_startup_paths_creates_missing_file() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let startup = super::resolve_startup_paths(cwd, Some("notes.txt")).unwrap();
    let file = cwd.join("notes.txt");
    assert_eq!(startup.workspace, cwd);
    assert_eq!(startup.open_file, Some(file.clone()));
    assert_eq!(std::fs::read_to_string(file).unwrap(), "");
}

#[test]
fn resolve_startup_paths_errors_for_missing_directory() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let err = super::resolve_startup_paths(cwd, Some("nope/a.txt")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn resolve_startup_paths_accepts_absolute_paths() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();
    let file = other.path().join("b.txt");
    std::fs::write(&file, "b").unwrap();

    let arg = file.to_str().unwrap();
    let startup = super::resolve_startup_paths(dir.path(), Some(arg)).unwrap();
    assert_eq!(startup.workspace, other.path());
    assert_eq!(startup.open_file, Some(file));
}
