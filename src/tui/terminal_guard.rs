//! Raw-mode/alternate-screen lifetime and termination-signal handling.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const SIGNAL_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Switches the terminal into and out of the editor screen.
pub trait ScreenOps: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

/// Raw mode on the alternate screen with a steady bar cursor.
#[derive(Debug, Default)]
pub struct AlternateScreen;

impl ScreenOps for AlternateScreen {
    fn enter(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::execute;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, SetCursorStyle::SteadyBar)
    }

    fn leave(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        let raw = disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            SetCursorStyle::DefaultUserShape
        );
        raw.and(screen)
    }
}

/// Shared handle that leaves the editor screen. Only the first call across all clones
/// touches the terminal.
#[derive(Clone)]
pub struct TerminalRestorer {
    done: Arc<AtomicBool>,
    ops: Arc<dyn ScreenOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.leave()
    }

    pub fn is_restored(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

/// Enters the editor screen on construction and leaves it on drop.
pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(AlternateScreen))
    }

    pub fn with_ops(ops: Arc<dyn ScreenOps>) -> io::Result<Self> {
        ops.enter()?;
        Ok(Self {
            restorer: TerminalRestorer {
                done: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::warn!(error = %e, "cannot restore terminal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn from_raw(signo: i32) -> Option<Self> {
        match signo {
            2 => Some(TerminationSignal::SigInt),
            15 => Some(TerminationSignal::SigTerm),
            _ => None,
        }
    }

    pub fn signo(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 2,
            TerminationSignal::SigTerm => 15,
        }
    }

    /// Shell convention: 128 plus the signal number.
    pub fn exit_code(self) -> i32 {
        128 + self.signo()
    }
}

/// Background listener for SIGINT/SIGTERM. Dropping it stops listening; a grace
/// timer that is already running still ends the process.
#[cfg(unix)]
pub struct SignalWatcher {
    handle: signal_hook::iterator::Handle,
}

#[cfg(unix)]
impl SignalWatcher {
    /// Forwards each signal to `tx`. If the session has not exited within the grace
    /// period, the terminal is restored and the process exits with the signal's code.
    pub fn install(
        restorer: TerminalRestorer,
        tx: std::sync::mpsc::Sender<TerminationSignal>,
    ) -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let handle = signals.handle();
        std::thread::spawn(move || {
            for raw in signals.forever() {
                let Some(signal) = TerminationSignal::from_raw(raw) else {
                    continue;
                };
                tracing::info!(?signal, "termination signal received");
                let _ = tx.send(signal);

                std::thread::sleep(SIGNAL_GRACE_PERIOD);
                let _ = restorer.restore();
                std::process::exit(signal.exit_code());
            }
        });

        Ok(Self { handle })
    }
}

#[cfg(unix)]
impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.handle.close();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
