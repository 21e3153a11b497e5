use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, event: &Event) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect);

    fn cursor_position(&self) -> Option<(u16, u16)> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

/// Which panel receives plain keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    Explorer,
    OpenFiles,
    #[default]
    Editor,
}

impl FocusTarget {
    pub fn next(self) -> Self {
        match self {
            FocusTarget::Explorer => FocusTarget::OpenFiles,
            FocusTarget::OpenFiles => FocusTarget::Editor,
            FocusTarget::Editor => FocusTarget::Explorer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FocusTarget::Explorer => "Explorer",
            FocusTarget::OpenFiles => "Open Files",
            FocusTarget::Editor => "Editor",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/view.rs"]
mod tests;
