//! Session controller: the only place that changes which files are open and which one
//! is current.
//!
//! Every operation reports failures as a status message and returns a
//! [`DispatchResult`]; nothing here blocks on a child process. VCS probes and the
//! deferred focus of the open-files list are handed back as [`Effect`]s.

use crate::kernel::action::{Action, EditorAction};
use crate::kernel::confirm::{resolution_for, ConfirmationWorkflow, Decision, FollowUp, Resolution};
use crate::kernel::effect::Effect;
use crate::kernel::error::{Result, SessionError};
use crate::kernel::explorer::{Activation, Explorer};
use crate::kernel::refresh::{build_status_view, RefreshThrottle, StatusView};
use crate::kernel::registry::{absolutize, CloseOutcome, OpenOutcome, Registry, Removal};
use crate::kernel::services::ports::{FileProvider, SessionConfig};
use crate::kernel::vcs::VcsSnapshot;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: true,
        }
    }

    fn changed_if(changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed: changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Clone)]
pub struct TickOutput {
    pub view: StatusView,
    /// Current file every tick, all files on throttle boundaries.
    pub probe: Vec<PathBuf>,
}

pub struct SessionController {
    registry: Registry,
    workspace: PathBuf,
    explorer: Explorer,
    confirm: ConfirmationWorkflow,
    files: Arc<dyn FileProvider>,
    config: SessionConfig,
    throttle: RefreshThrottle,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl SessionController {
    pub fn new(files: Arc<dyn FileProvider>, config: SessionConfig, workspace: &Path) -> Self {
        let workspace = absolutize(workspace);
        let explorer = Explorer::new(workspace.clone(), config.show_hidden);
        let throttle = RefreshThrottle::new(config.vcs_throttle_ticks);
        let mut controller = Self {
            registry: Registry::new(),
            workspace: workspace.clone(),
            explorer,
            confirm: ConfirmationWorkflow::new(),
            files,
            config,
            throttle,
            status: None,
            should_quit: false,
        };
        controller.render_explorer();
        controller
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn confirm(&self) -> &ConfirmationWorkflow {
        &self.confirm
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenOrSwitch(path) => self.open_or_switch(&path),
            Action::SwitchTo(path) => self.switch_to(&path),
            Action::Save => self.save(),
            Action::SaveAs(path) => self.save_as(&path),
            Action::NewFile => {
                let dir = self.workspace.clone();
                self.new_file(&dir)
            }
            Action::NewOrResumeLast(dir) => self.new_or_resume_last(&dir),
            Action::CloseCurrent => self.close_current(),
            Action::Next => self.next(),
            Action::Previous => self.previous(),
            Action::CheckAllForSaveOnQuit => self.check_all_for_save_on_quit(),
            Action::Confirm(decision) => self.resolve_confirmation(decision),
            Action::ExplorerActivate => self.explorer_activate(),
            Action::ExplorerMoveSelection { delta } => {
                DispatchResult::changed_if(self.explorer.move_selection(delta))
            }
            Action::ExplorerSetViewHeight { height } => {
                DispatchResult::changed_if(self.explorer.set_view_height(height))
            }
            Action::ToggleHidden => self.toggle_hidden(),
            Action::Tick => {
                let output = self.tick();
                let mut result = DispatchResult::changed();
                if !output.probe.is_empty() {
                    result.effects.push(Effect::ProbeVcs(output.probe));
                }
                result
            }
            Action::VcsProbed { path, snapshot } => {
                DispatchResult::changed_if(self.apply_vcs(&path, snapshot))
            }
            Action::Edit(edit) => self.edit(edit),
        }
    }

    // ==================== file lifecycle ====================

    pub fn open_or_switch(&mut self, path: &Path) -> DispatchResult {
        let path = absolutize(path);
        match self.registry.open(&path, self.files.as_ref()) {
            Ok(OpenOutcome::Opened(_)) => {
                tracing::info!(path = %path.display(), "opened file");
            }
            Ok(OpenOutcome::AlreadyOpen(index)) => {
                self.registry.set_current(index);
            }
            Err(e) => return self.fail(e),
        }
        self.current_changed()
    }

    pub fn switch_to(&mut self, path: &Path) -> DispatchResult {
        let path = absolutize(path);
        match self.registry.switch_to(&path) {
            Ok(_) => self.current_changed(),
            Err(e) => self.fail(e),
        }
    }

    pub fn save(&mut self) -> DispatchResult {
        let Some(index) = self.registry.current_index() else {
            return DispatchResult::unchanged();
        };
        match self.save_index(index) {
            Ok(path) => {
                self.info(format!("Saved {}", path.display()));
                DispatchResult {
                    effects: vec![Effect::ProbeVcs(vec![path])],
                    state_changed: true,
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Writes the current buffer to `new_path` and replaces its entry with one for
    /// `new_path`. The old file stays on disk.
    pub fn save_as(&mut self, new_path: &Path) -> DispatchResult {
        if self.confirm.is_pending() {
            return self.fail(SessionError::ConfirmationPending);
        }
        let Some(index) = self.registry.current_index() else {
            return DispatchResult::unchanged();
        };
        let Some(entry) = self.registry.get(index) else {
            return DispatchResult::unchanged();
        };

        let new_path = absolutize(new_path);
        if new_path.as_path() == entry.path() {
            return self.save();
        }
        if self.registry.is_open(&new_path) {
            return self.fail(SessionError::PathInUse(new_path));
        }

        let content = entry.buffer().serialize();
        let cursor = entry.buffer().cursor();
        let encoding = entry.text_encoding().clone();
        let old_dir = entry.directory().to_path_buf();
        if let Err(e) = self
            .files
            .write_text_private(&new_path, &content, &encoding)
        {
            return self.fail(SessionError::io("save", &new_path, e));
        }

        self.registry.remove_at(index);
        match self.registry.open(&new_path, self.files.as_ref()) {
            Ok(_) => {
                if let Some(entry) = self.registry.current_mut() {
                    entry.buffer_mut().set_cursor(cursor.0, cursor.1);
                }
                self.info(format!("Saved as {}", new_path.display()));
            }
            Err(e) => {
                self.report(&e);
                if self.registry.is_empty() {
                    return self.new_file(&old_dir);
                }
            }
        }
        self.current_changed()
    }

    /// Creates an empty uniquely named file in `dir` and opens it. Falls back to the
    /// system temp directory when `dir` is not writable.
    pub fn new_file(&mut self, dir: &Path) -> DispatchResult {
        let prefix = self.config.new_file_prefix.clone();
        let path = match self.files.create_temp_file(dir, &prefix) {
            Ok(path) => path,
            Err(e) => {
                let fallback = std::env::temp_dir();
                tracing::warn!(
                    dir = %dir.display(),
                    fallback = %fallback.display(),
                    error = %e,
                    "cannot create new file, trying temp dir"
                );
                match self.files.create_temp_file(&fallback, &prefix) {
                    Ok(path) => path,
                    Err(_) => return self.fail(SessionError::io("create a file in", dir, e)),
                }
            }
        };
        self.open_or_switch(&path)
    }

    pub fn new_or_resume_last(&mut self, dir: &Path) -> DispatchResult {
        if self.registry.current_index().is_some() {
            return self.current_changed();
        }
        self.new_file(dir)
    }

    pub fn close_current(&mut self) -> DispatchResult {
        if self.confirm.is_pending() {
            return self.fail(SessionError::ConfirmationPending);
        }
        let Some(path) = self.registry.current_path().map(Path::to_path_buf) else {
            return DispatchResult::unchanged();
        };

        match self.registry.close(&path) {
            CloseOutcome::NeedsConfirmation(index) => {
                self.ask_to_save(index, FollowUp::CloseAfter)
            }
            CloseOutcome::Removed(removal) => {
                tracing::info!(path = %path.display(), "closed file");
                self.after_removal(removal)
            }
            CloseOutcome::NotOpen => DispatchResult::unchanged(),
        }
    }

    pub fn next(&mut self) -> DispatchResult {
        match self.registry.next() {
            Some(_) => self.current_changed(),
            None => DispatchResult::unchanged(),
        }
    }

    pub fn previous(&mut self) -> DispatchResult {
        match self.registry.previous() {
            Some(_) => self.current_changed(),
            None => DispatchResult::unchanged(),
        }
    }

    /// Prompts for the first modified file only. Resolving the prompt runs this again,
    /// so later modified files are found one at a time.
    pub fn check_all_for_save_on_quit(&mut self) -> DispatchResult {
        if self.confirm.is_pending() {
            return self.fail(SessionError::ConfirmationPending);
        }
        match self.registry.first_modified() {
            Some(index) => {
                self.registry.set_current(index);
                let mut result = self.current_changed();
                let prompt = self.ask_to_save(index, FollowUp::QuitAfter);
                result.effects.extend(prompt.effects);
                result
            }
            None => {
                tracing::info!(open = self.registry.len(), "no unsaved changes, quitting");
                self.should_quit = true;
                DispatchResult {
                    effects: vec![Effect::Quit],
                    state_changed: true,
                }
            }
        }
    }

    pub fn resolve_confirmation(&mut self, decision: Decision) -> DispatchResult {
        let Some((index, follow_up)) = self.confirm.take() else {
            return DispatchResult::unchanged();
        };
        tracing::debug!(index, ?follow_up, ?decision, "save prompt answered");

        match resolution_for(decision, follow_up) {
            Resolution::SaveThen(next) => match self.save_index(index) {
                Ok(path) => {
                    self.info(format!("Saved {}", path.display()));
                    self.run_follow_up(index, next)
                }
                Err(e) => self.fail(e),
            },
            Resolution::DiscardThen(next) => {
                if let Some(entry) = self.registry.get_mut(index) {
                    entry.buffer_mut().set_modified(false);
                }
                self.run_follow_up(index, next)
            }
            Resolution::Abort => {
                if follow_up == FollowUp::QuitAfter {
                    self.info("Quit cancelled".to_string());
                }
                DispatchResult::changed()
            }
        }
    }

    // ==================== refresh ====================

    pub fn tick(&mut self) -> TickOutput {
        let all = self.throttle.advance();
        let probe = if all {
            self.registry.paths().map(Path::to_path_buf).collect()
        } else {
            self.registry
                .current_path()
                .map(|p| vec![p.to_path_buf()])
                .unwrap_or_default()
        };
        TickOutput {
            view: build_status_view(&self.registry),
            probe,
        }
    }

    pub fn status_view(&self) -> StatusView {
        build_status_view(&self.registry)
    }

    /// Returns whether the stored snapshot changed. Results for closed files are dropped.
    pub fn apply_vcs(&mut self, path: &Path, snapshot: VcsSnapshot) -> bool {
        match self.registry.entry_mut_by_path(path) {
            Some(entry) if entry.vcs() != &snapshot => {
                entry.set_vcs(snapshot);
                true
            }
            _ => false,
        }
    }

    // ==================== explorer ====================

    pub fn explorer_activate(&mut self) -> DispatchResult {
        match self.explorer.activate_selected(self.files.as_ref()) {
            Activation::Nothing => DispatchResult::unchanged(),
            Activation::Toggled => DispatchResult::changed(),
            Activation::Open(path) => self.open_or_switch(&path),
            Activation::Rejected(message) => {
                self.warn(message);
                DispatchResult::changed()
            }
        }
    }

    pub fn toggle_hidden(&mut self) -> DispatchResult {
        let show_hidden = !self.explorer.show_hidden();
        self.config.show_hidden = show_hidden;
        if let Err(e) = self
            .explorer
            .set_show_hidden(show_hidden, self.files.as_ref())
        {
            return self.fail(e);
        }
        DispatchResult::changed()
    }

    // ==================== editing ====================

    pub fn edit(&mut self, action: EditorAction) -> DispatchResult {
        let Some(entry) = self.registry.current_mut() else {
            return DispatchResult::unchanged();
        };
        let buffer = entry.buffer_mut();
        match action {
            EditorAction::InsertChar(c) => buffer.insert_char(c),
            EditorAction::InsertNewline => buffer.insert_newline(),
            EditorAction::Backspace => {
                buffer.delete_backward();
            }
            EditorAction::Delete => {
                buffer.delete_forward();
            }
            EditorAction::MoveLeft => buffer.move_left(),
            EditorAction::MoveRight => buffer.move_right(),
            EditorAction::MoveUp => buffer.move_up(),
            EditorAction::MoveDown => buffer.move_down(),
            EditorAction::LineStart => buffer.move_line_start(),
            EditorAction::LineEnd => buffer.move_line_end(),
        }
        DispatchResult::changed()
    }

    /// Places the cursor of the current file, clamped to its content. 0-based.
    pub fn seed_cursor(&mut self, line: usize, column: usize) {
        if let Some(entry) = self.registry.current_mut() {
            entry.buffer_mut().set_cursor(line, column);
        }
    }

    // ==================== internals ====================

    fn save_index(&mut self, index: usize) -> Result<PathBuf> {
        let entry = self
            .registry
            .get_mut(index)
            .ok_or(SessionError::NoSuchEntry(index))?;
        // Unedited lossy text: the file already holds the original bytes.
        if entry.text_encoding().lossy && !entry.is_modified() {
            tracing::info!(path = %entry.path().display(), "left undecodable file as it is");
            return Ok(entry.path().to_path_buf());
        }
        let content = entry.buffer().serialize();
        self.files
            .write_text_private(entry.path(), &content, entry.text_encoding())
            .map_err(|e| SessionError::io("save", entry.path(), e))?;
        entry.buffer_mut().mark_saved();
        tracing::info!(path = %entry.path().display(), bytes = content.len(), "saved file");
        Ok(entry.path().to_path_buf())
    }

    fn ask_to_save(&mut self, index: usize, follow_up: FollowUp) -> DispatchResult {
        let name = self
            .registry
            .get(index)
            .map(|e| e.file_name())
            .unwrap_or_default();
        match self.confirm.begin(index, follow_up, &name) {
            Ok(()) => DispatchResult::changed(),
            Err(e) => self.fail(e),
        }
    }

    fn run_follow_up(&mut self, index: usize, follow_up: FollowUp) -> DispatchResult {
        match follow_up {
            FollowUp::Nothing => DispatchResult::changed(),
            FollowUp::CloseAfter => match self.registry.remove_at(index) {
                Some(removal) => self.after_removal(removal),
                None => DispatchResult::changed(),
            },
            FollowUp::QuitAfter => self.check_all_for_save_on_quit(),
        }
    }

    fn after_removal(&mut self, removal: Removal) -> DispatchResult {
        if removal.needs_replacement {
            return self.new_file(&removal.dir);
        }
        if removal.was_current {
            return self.current_changed();
        }
        DispatchResult::changed()
    }

    /// Moves the workspace to the current file's directory and asks for an immediate
    /// VCS probe plus a deferred focus of its row.
    fn current_changed(&mut self) -> DispatchResult {
        let Some(path) = self.registry.current_path().map(Path::to_path_buf) else {
            return DispatchResult::changed();
        };

        if let Some(dir) = path.parent() {
            if dir != self.workspace {
                self.workspace = dir.to_path_buf();
                self.render_explorer();
            }
        }

        DispatchResult {
            effects: vec![
                Effect::ProbeVcs(vec![path.clone()]),
                Effect::FocusOpenFile {
                    path,
                    delay: self.config.focus_sync_delay(),
                },
            ],
            state_changed: true,
        }
    }

    fn render_explorer(&mut self) {
        let show_hidden = self.config.show_hidden;
        if let Err(e) = self
            .explorer
            .render(&self.workspace, show_hidden, self.files.as_ref())
        {
            self.report(&e);
        }
    }

    fn info(&mut self, text: String) {
        tracing::debug!(status = %text);
        self.status = Some(StatusMessage {
            text,
            is_error: false,
        });
    }

    fn warn(&mut self, text: String) {
        tracing::warn!(status = %text);
        self.status = Some(StatusMessage {
            text,
            is_error: true,
        });
    }

    fn report(&mut self, error: &SessionError) {
        self.warn(error.to_string());
    }

    fn fail(&mut self, error: SessionError) -> DispatchResult {
        self.report(&error);
        DispatchResult::changed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
