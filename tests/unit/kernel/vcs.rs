use super::*;

#[test]
fn default_snapshot_uses_sentinels() {
    let snapshot = VcsSnapshot::default();
    assert_eq!(snapshot.commit, "No GIT");
    assert_eq!(snapshot.branch, "Unknown");
    assert_eq!(snapshot.worktree.label(), "Up to date");
    assert_eq!(snapshot.file_status.to_string(), "  ");
    assert!(!snapshot.is_repository());
}

#[test]
fn status_line_takes_first_two_chars() {
    let code = FileStatusCode::from_status_line(" M src/main.rs");
    assert_eq!(code.to_string(), " M");
    assert_eq!(code.kind(), Some(FileStatusKind::Modified));

    let code = FileStatusCode::from_status_line("?? notes.txt");
    assert_eq!(code.kind(), Some(FileStatusKind::Untracked));

    assert!(FileStatusCode::from_status_line("").is_clean());
    assert!(FileStatusCode::from_status_line("M").is_clean());
}

#[test]
fn conflicts_win_over_other_kinds() {
    assert_eq!(
        FileStatusCode::new('U', 'M').kind(),
        Some(FileStatusKind::Conflict)
    );
    assert_eq!(
        FileStatusCode::new('A', 'A').kind(),
        Some(FileStatusKind::Conflict)
    );
}

#[test]
fn index_only_changes_are_classified() {
    assert_eq!(
        FileStatusCode::new('A', ' ').kind(),
        Some(FileStatusKind::Added)
    );
    assert_eq!(
        FileStatusCode::new('R', ' ').kind(),
        Some(FileStatusKind::Renamed)
    );
    assert_eq!(
        FileStatusCode::new(' ', 'D').kind(),
        Some(FileStatusKind::Deleted)
    );
    assert_eq!(FileStatusCode::CLEAN.kind(), None);
}

#[test]
fn pending_commit_label() {
    assert_eq!(WorktreeStatus::PendingCommit.to_string(), "Pending Commit");
}
