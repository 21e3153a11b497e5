//! Workbench: hosts one session, routes keys to it and renders it.
//!
//! The session never touches the terminal or the runtime. Effects it returns are
//! carried out here, and runtime messages come back through `handle_message`.

use super::theme::UiTheme;
use crate::kernel::services::adapters::{AsyncRuntime, RefreshLoop};
use crate::kernel::services::ports::VcsProbe;
use crate::kernel::{Action, SessionController, StatusView};
use crate::tui::view::{EventResult, FocusTarget, View};
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use std::sync::Arc;

mod input;
mod render;
mod tick;
mod util;

const STATUS_HEIGHT: u16 = 1;
const MESSAGE_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH_PERCENT: u16 = 30;
const SIDEBAR_MIN_WIDTH: u16 = 20;
const EXPLORER_HEIGHT_PERCENT: u16 = 60;
const MAX_MESSAGE_DRAIN_PER_TICK: usize = 256;

pub struct Workbench {
    session: SessionController,
    runtime: AsyncRuntime,
    vcs: Arc<dyn VcsProbe>,
    refresh: Option<RefreshLoop>,
    probes_in_flight: FxHashSet<PathBuf>,
    view: StatusView,
    theme: UiTheme,
    focus: FocusTarget,
    open_files_selected: usize,
    /// Text of the save-as prompt while it is open.
    save_as: Option<String>,
    quit_prompt: bool,
    exiting: bool,
    editor_scroll: usize,
    last_explorer_height: Option<u16>,
    last_cursor: Option<(u16, u16)>,
}

impl Workbench {
    pub fn new(
        session: SessionController,
        runtime: AsyncRuntime,
        vcs: Arc<dyn VcsProbe>,
        theme: UiTheme,
    ) -> Self {
        let view = session.status_view();
        Self {
            session,
            runtime,
            vcs,
            refresh: None,
            probes_in_flight: FxHashSet::default(),
            view,
            theme,
            focus: FocusTarget::default(),
            open_files_selected: 0,
            save_as: None,
            quit_prompt: false,
            exiting: false,
            editor_scroll: 0,
            last_explorer_height: None,
            last_cursor: None,
        }
    }

    /// Starts the periodic refresh. Calling it twice keeps the first loop.
    pub fn start_refresh(&mut self) {
        if self.refresh.is_some() {
            return;
        }
        let interval = self.session.config().refresh_interval;
        tracing::debug!(interval_ms = interval.as_millis() as u64, "refresh loop started");
        self.refresh = Some(self.runtime.start_refresh_loop(interval));
    }

    pub fn shutdown(&mut self) {
        if let Some(refresh) = self.refresh.take() {
            refresh.stop();
            tracing::debug!("refresh loop stopped");
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn view(&self) -> &StatusView {
        &self.view
    }

    pub fn should_exit(&self) -> bool {
        self.exiting
    }

    pub(super) fn dispatch(&mut self, action: Action) -> bool {
        let result = self.session.dispatch(action);
        self.run_effects(result.effects);
        if result.state_changed {
            self.view = self.session.status_view();
        }
        result.state_changed
    }
}

impl Drop for Workbench {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &Event) -> EventResult {
        input::handle_input(self, event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        self.last_cursor
    }
}
