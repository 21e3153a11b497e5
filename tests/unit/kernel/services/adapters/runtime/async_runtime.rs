use super::*;
use crate::kernel::vcs::{FileStatusCode, VcsSnapshot, WorktreeStatus};
use std::path::Path;
use std::sync::mpsc;

struct FixedProbe;

impl VcsProbe for FixedProbe {
    fn commit(&self, _dir: &Path) -> String {
        "abc1234".to_string()
    }

    fn branch(&self, _dir: &Path) -> String {
        "main".to_string()
    }

    fn working_tree_status(&self, _dir: &Path) -> WorktreeStatus {
        WorktreeStatus::PendingCommit
    }

    fn file_status(&self, _dir: &Path, _path: &Path) -> FileStatusCode {
        FileStatusCode::new(' ', 'M')
    }
}

#[test]
fn test_refresh_loop_ticks_until_stopped() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    let refresh = runtime.start_refresh_loop(Duration::from_millis(5));

    for _ in 0..3 {
        let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(msg, AppMessage::Tick);
    }

    refresh.stop();
    std::thread::sleep(Duration::from_millis(50));
    assert!(refresh.is_finished());
    while rx.try_recv().is_ok() {}
    std::thread::sleep(Duration::from_millis(30));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_vcs_result_is_delivered() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    runtime.probe_vcs(Arc::new(FixedProbe), PathBuf::from("/repo/a.txt"));

    let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(
        msg,
        AppMessage::VcsProbed {
            path: PathBuf::from("/repo/a.txt"),
            snapshot: VcsSnapshot {
                commit: "abc1234".to_string(),
                branch: "main".to_string(),
                worktree: WorktreeStatus::PendingCommit,
                file_status: FileStatusCode::new(' ', 'M'),
            },
        }
    );
}

struct PanickingVcs;

impl VcsProbe for PanickingVcs {
    fn commit(&self, _dir: &Path) -> String {
        panic!("git crashed");
    }

    fn branch(&self, _dir: &Path) -> String {
        unreachable!()
    }

    fn working_tree_status(&self, _dir: &Path) -> WorktreeStatus {
        unreachable!()
    }

    fn file_status(&self, _dir: &Path, _path: &Path) -> FileStatusCode {
        unreachable!()
    }
}

#[test]
fn test_failed_status_task_reports_empty_snapshot() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    runtime.probe_vcs(Arc::new(PanickingVcs), PathBuf::from("/repo/a.txt"));

    let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(
        msg,
        AppMessage::VcsProbed {
            path: PathBuf::from("/repo/a.txt"),
            snapshot: VcsSnapshot::default(),
        }
    );
}

#[test]
fn test_focus_is_deferred() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    runtime.schedule_focus(PathBuf::from("/a.txt"), Duration::from_millis(40));

    assert!(rx.recv_timeout(Duration::from_millis(5)).is_err());
    let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(
        msg,
        AppMessage::FocusOpenFile {
            path: PathBuf::from("/a.txt")
        }
    );
}
