use super::*;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingScreen {
    calls: Mutex<Vec<&'static str>>,
}

impl ScreenOps for RecordingScreen {
    fn enter(&self) -> std::io::Result<()> {
        self.calls.lock().unwrap().push("enter");
        Ok(())
    }

    fn leave(&self) -> std::io::Result<()> {
        self.calls.lock().unwrap().push("leave");
        Ok(())
    }
}

struct BrokenTty;

impl ScreenOps for BrokenTty {
    fn enter(&self) -> std::io::Result<()> {
        Ok(())
    }

    fn leave(&self) -> std::io::Result<()> {
        Err(std::io::Error::other("tty gone"))
    }
}

struct NoTty;

impl ScreenOps for NoTty {
    fn enter(&self) -> std::io::Result<()> {
        Err(std::io::Error::other("not a terminal"))
    }

    fn leave(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn guard_leaves_screen_on_drop() {
    let screen = Arc::new(RecordingScreen::default());
    {
        let _guard = TerminalGuard::with_ops(screen.clone()).unwrap();
    }

    assert_eq!(&*screen.calls.lock().unwrap(), &["enter", "leave"]);
}

#[test]
fn restorer_clones_share_one_restore() {
    let screen = Arc::new(RecordingScreen::default());
    let guard = TerminalGuard::with_ops(screen.clone()).unwrap();
    let first = guard.restorer();
    let second = first.clone();

    assert!(!second.is_restored());
    first.restore().unwrap();
    assert!(second.is_restored());
    second.restore().unwrap();
    drop(guard);

    assert_eq!(&*screen.calls.lock().unwrap(), &["enter", "leave"]);
}

#[test]
fn failed_restore_is_not_retried() {
    let guard = TerminalGuard::with_ops(Arc::new(BrokenTty)).unwrap();
    let restorer = guard.restorer();

    assert!(restorer.restore().is_err());
    assert!(restorer.restore().is_ok());
}

#[test]
fn enter_failure_is_reported() {
    assert!(TerminalGuard::with_ops(Arc::new(NoTty)).is_err());
}

#[test]
fn termination_signals_use_shell_exit_codes() {
    assert_eq!(TerminationSignal::SigInt.exit_code(), 130);
    assert_eq!(TerminationSignal::SigTerm.exit_code(), 143);
    assert_eq!(TerminationSignal::from_raw(2), Some(TerminationSignal::SigInt));
    assert_eq!(TerminationSignal::from_raw(15), Some(TerminationSignal::SigTerm));
    assert_eq!(TerminationSignal::from_raw(1), None);
}
