use super::Workbench;
use crate::kernel::{Action, Decision, EditorAction};
use crate::tui::view::{EventResult, FocusTarget};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;

pub(super) fn handle_input(workbench: &mut Workbench, event: &Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => workbench.handle_key(key),
        Event::Resize(_, _) => EventResult::Consumed,
        _ => EventResult::Ignored,
    }
}

impl Workbench {
    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        // Modal prompts swallow every key until answered.
        if self.quit_prompt {
            return self.handle_quit_prompt_key(key);
        }
        if self.session.confirm().is_pending() {
            return self.handle_confirm_key(key);
        }
        if self.save_as.is_some() {
            return self.handle_save_as_key(key);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let global = match key.code {
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Char('n') if ctrl => Some(Action::NewFile),
            KeyCode::Char('t') if ctrl => Some(Action::CloseCurrent),
            KeyCode::Char('q') if ctrl => Some(Action::CheckAllForSaveOnQuit),
            KeyCode::Char('h') if ctrl => Some(Action::ToggleHidden),
            KeyCode::F(6) => Some(Action::Previous),
            KeyCode::F(7) => Some(Action::Next),
            KeyCode::Char('s') if alt => {
                self.open_save_as();
                return EventResult::Consumed;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return EventResult::Consumed;
            }
            KeyCode::Esc => {
                self.focus = FocusTarget::OpenFiles;
                return EventResult::Consumed;
            }
            _ => None,
        };
        if let Some(action) = global {
            self.session.clear_status();
            self.dispatch(action);
            return self.exit_or_consumed();
        }

        match self.focus {
            FocusTarget::Explorer => self.handle_explorer_key(key),
            FocusTarget::OpenFiles => self.handle_open_files_key(key),
            FocusTarget::Editor => self.handle_editor_key(key),
        }
    }

    fn exit_or_consumed(&self) -> EventResult {
        if self.exiting {
            EventResult::Quit
        } else {
            EventResult::Consumed
        }
    }

    fn handle_quit_prompt_key(&mut self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.quit_prompt = false;
                self.exiting = true;
                EventResult::Quit
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.quit_prompt = false;
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_confirm_key(&mut self, key: &KeyEvent) -> EventResult {
        let decision = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Decision::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => Decision::No,
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc => Decision::Cancel,
            _ => return EventResult::Ignored,
        };
        self.dispatch(Action::Confirm(decision));
        self.exit_or_consumed()
    }

    fn open_save_as(&mut self) {
        let initial = self
            .session
            .registry()
            .current_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.save_as = Some(initial);
    }

    fn handle_save_as_key(&mut self, key: &KeyEvent) -> EventResult {
        let Some(input) = self.save_as.as_mut() else {
            return EventResult::Ignored;
        };
        match key.code {
            KeyCode::Esc => self.save_as = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
            KeyCode::Enter => {
                let typed = input.trim().to_string();
                self.save_as = None;
                if typed.is_empty() {
                    return EventResult::Consumed;
                }
                let mut path = PathBuf::from(typed);
                if path.is_relative() {
                    path = self.session.workspace().join(path);
                }
                self.session.clear_status();
                self.dispatch(Action::SaveAs(path));
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_explorer_key(&mut self, key: &KeyEvent) -> EventResult {
        let page = self.session.explorer().view_height.max(1) as isize;
        let action = match key.code {
            KeyCode::Up => Action::ExplorerMoveSelection { delta: -1 },
            KeyCode::Down => Action::ExplorerMoveSelection { delta: 1 },
            KeyCode::PageUp => Action::ExplorerMoveSelection { delta: -page },
            KeyCode::PageDown => Action::ExplorerMoveSelection { delta: page },
            KeyCode::Enter | KeyCode::Right => {
                let before = self.session.registry().current_path().map(|p| p.to_path_buf());
                self.session.clear_status();
                self.dispatch(Action::ExplorerActivate);
                let after = self.session.registry().current_path();
                if after.is_some() && after != before.as_deref() {
                    self.focus = FocusTarget::Editor;
                }
                return EventResult::Consumed;
            }
            _ => return EventResult::Ignored,
        };
        self.dispatch(action);
        EventResult::Consumed
    }

    fn handle_open_files_key(&mut self, key: &KeyEvent) -> EventResult {
        let len = self.session.registry().len();
        match key.code {
            KeyCode::Up => {
                self.open_files_selected = self.open_files_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.open_files_selected + 1 < len {
                    self.open_files_selected += 1;
                }
            }
            KeyCode::Enter => {
                let Some(path) = self
                    .session
                    .registry()
                    .get(self.open_files_selected)
                    .map(|e| e.path().to_path_buf())
                else {
                    return EventResult::Ignored;
                };
                self.dispatch(Action::SwitchTo(path));
                self.focus = FocusTarget::Editor;
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_editor_key(&mut self, key: &KeyEvent) -> EventResult {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let edit = match key.code {
            KeyCode::Char(c) if plain => EditorAction::InsertChar(c),
            KeyCode::Enter => EditorAction::InsertNewline,
            KeyCode::Backspace => EditorAction::Backspace,
            KeyCode::Delete => EditorAction::Delete,
            KeyCode::Left => EditorAction::MoveLeft,
            KeyCode::Right => EditorAction::MoveRight,
            KeyCode::Up => EditorAction::MoveUp,
            KeyCode::Down => EditorAction::MoveDown,
            KeyCode::Home => EditorAction::LineStart,
            KeyCode::End => EditorAction::LineEnd,
            _ => return EventResult::Ignored,
        };
        self.dispatch(Action::Edit(edit));
        EventResult::Consumed
    }
}
