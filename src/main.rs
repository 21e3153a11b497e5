use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use crossterm::event;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use quill::app::theme::UiTheme;
use quill::app::Workbench;
use quill::kernel::services::adapters::{
    self, AppMessage, AsyncRuntime, GitProbe, LocalFileProvider, SystemProcessRunner,
};
use quill::kernel::services::ports::{CursorSettings, SessionConfig, Settings};
use quill::kernel::SessionController;
use quill::tui::terminal_guard::{TerminalGuard, TerminationSignal};
use quill::tui::view::View;

mod logging;

const USAGE: &str = "usage: quill [FILE]";
const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
struct StartupPaths {
    workspace: PathBuf,
    open_file: Option<PathBuf>,
}

/// Resolves the optional CLI path against `cwd`.
///
/// A directory becomes the workspace. A file is opened with its directory as the workspace;
/// a missing file is created empty first.
fn resolve_startup_paths(cwd: &Path, arg: Option<&str>) -> io::Result<StartupPaths> {
    let Some(arg) = arg else {
        return Ok(StartupPaths {
            workspace: cwd.to_path_buf(),
            open_file: None,
        });
    };

    let path = cwd.join(arg);
    if path.is_dir() {
        return Ok(StartupPaths {
            workspace: path,
            open_file: None,
        });
    }

    let workspace = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    if !workspace.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", workspace.display()),
        ));
    }
    if !path.exists() {
        std::fs::File::create(&path)?;
        tracing::info!(path = %path.display(), "created file from command line");
    }

    Ok(StartupPaths {
        workspace,
        open_file: Some(path),
    })
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("quill: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> io::Result<i32> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 1 {
        eprintln!("{USAGE}");
        return Ok(2);
    }
    let arg = args.first().map(String::as_str);

    let app_dir = adapters::ensure_app_dir()?;
    let logging_guard = logging::init(&app_dir)?;
    tracing::debug!(log_dir = %logging_guard.log_dir().display(), "logging ready");

    let cwd = std::env::current_dir()?;
    let startup = resolve_startup_paths(&cwd, arg)?;
    let settings = adapters::load_settings(&app_dir);

    let workspace = match (&startup.open_file, &settings.workspace) {
        (None, Some(saved)) if arg.is_none() && saved.is_dir() => saved.clone(),
        _ => startup.workspace.clone(),
    };
    let mut session = SessionController::new(
        Arc::new(LocalFileProvider::new()),
        SessionConfig::from_settings(&settings),
        &workspace,
    );
    restore_session(&mut session, &startup, arg.is_some(), &settings, &app_dir, &workspace);

    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx)?;
    let vcs = Arc::new(GitProbe::new(SystemProcessRunner));
    let mut theme = UiTheme::named(&settings.theme);
    theme.adapt_to_terminal_capabilities();
    let mut workbench = Workbench::new(session, runtime, vcs, theme);

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signals = quill::tui::terminal_guard::SignalWatcher::install(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    workbench.start_refresh();
    let outcome = run_loop(&mut terminal, &mut workbench, &rx, &signal_rx);
    workbench.shutdown();
    persist_session(&app_dir, workbench.session(), &settings);
    drop(terminal);
    drop(guard);

    match outcome? {
        Some(signal) => Ok(signal.exit_code()),
        None => {
            tracing::info!("quill exited");
            Ok(0)
        }
    }
}

fn restore_session(
    session: &mut SessionController,
    startup: &StartupPaths,
    from_cli: bool,
    settings: &Settings,
    app_dir: &Path,
    workspace: &Path,
) {
    if let Some(path) = &startup.open_file {
        session.open_or_switch(path);
        return;
    }
    if from_cli {
        session.new_or_resume_last(workspace);
        return;
    }

    let mru = adapters::load_mru(app_dir);
    tracing::info!(files = mru.len(), "replaying recently used files");
    for path in &mru {
        session.open_or_switch(path);
    }
    if let Some(last) = &settings.last_file {
        if session.registry().is_open(last) {
            session.switch_to(last);
            let (line, column) = settings.cursor.to_zero_based();
            session.seed_cursor(line, column);
        }
    }
    session.new_or_resume_last(workspace);
}

/// Writes the MRU list and settings. Failures are logged; the session is already over.
fn persist_session(app_dir: &Path, session: &SessionController, previous: &Settings) {
    let registry = session.registry();
    if let Err(e) = adapters::save_mru(app_dir, registry.paths()) {
        tracing::warn!(error = %e, "cannot save recently used files");
    }

    let mut settings = previous.clone();
    settings.workspace = Some(session.workspace().to_path_buf());
    settings.last_file = registry.current_path().map(Path::to_path_buf);
    if let Some(entry) = registry.current() {
        settings.cursor = CursorSettings::from_zero_based(entry.buffer().cursor());
    }
    settings.show_hidden = session.config().show_hidden;
    if let Err(e) = adapters::save_settings(app_dir, &settings) {
        tracing::warn!(error = %e, "cannot save settings");
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workbench: &mut Workbench,
    rx: &mpsc::Receiver<AppMessage>,
    signal_rx: &mpsc::Receiver<TerminationSignal>,
) -> io::Result<Option<TerminationSignal>> {
    let mut dirty = true;
    loop {
        if let Ok(signal) = signal_rx.try_recv() {
            return Ok(Some(signal));
        }

        dirty |= workbench.drain_messages(rx);
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
                if let Some(position) = workbench.cursor_position() {
                    frame.set_cursor_position(position);
                }
            })?;
            dirty = false;
        }

        if workbench.should_exit() {
            return Ok(None);
        }

        if event::poll(INPUT_POLL)? {
            let event = event::read()?;
            workbench.handle_input(&event);
            dirty = true;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup_paths.rs"]
mod cli_startup_paths_tests;
