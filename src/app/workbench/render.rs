use super::util;
use super::Workbench;
use crate::kernel::{Action, ConfirmState};
use crate::models::{slice_to_cow, NodeKind};
use crate::tui::view::FocusTarget;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const MODIFIED_MARKER: &str = "●";

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    workbench.last_cursor = None;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(super::STATUS_HEIGHT),
            Constraint::Length(super::MESSAGE_HEIGHT),
        ])
        .split(area);
    let body_area = chunks[0];
    let status_area = chunks[1];
    let message_area = chunks[2];

    let sidebar_width = util::sidebar_width(body_area.width);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(body_area);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(super::EXPLORER_HEIGHT_PERCENT),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    workbench.render_explorer(frame, sidebar[0]);
    workbench.render_open_files(frame, sidebar[1]);
    workbench.render_editor(frame, columns[1]);
    workbench.render_status(frame, status_area);
    workbench.render_message(frame, message_area);

    if let ConfirmState::AwaitingDecision { prompt, .. } = workbench.session.confirm().state() {
        workbench.render_choice_dialog(
            frame,
            area,
            "Save changes",
            prompt,
            "[Y]es  [N]o  [C]ancel",
        );
    } else if workbench.quit_prompt {
        workbench.render_choice_dialog(frame, area, "Quit", "Quit quill?", "[Y]es  [N]o");
    } else if workbench.save_as.is_some() {
        workbench.render_save_as_dialog(frame, area);
    }
}

impl Workbench {
    fn panel_block(&self, title: String, focused: bool) -> Block<'static> {
        let border = if focused {
            self.theme.focus_border
        } else {
            self.theme.inactive_border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, Style::default().fg(self.theme.header_fg)))
    }

    fn render_explorer(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusTarget::Explorer;
        let title = if self.session.explorer().show_hidden() {
            " Explorer (all) ".to_string()
        } else {
            " Explorer ".to_string()
        };
        let block = self.panel_block(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.last_explorer_height != Some(inner.height) {
            self.last_explorer_height = Some(inner.height);
            self.dispatch(Action::ExplorerSetViewHeight {
                height: inner.height as usize,
            });
        }

        let explorer = self.session.explorer();
        let selected = explorer.selected_index();
        let lines: Vec<Line> = explorer
            .rows()
            .iter()
            .enumerate()
            .skip(explorer.scroll_offset)
            .take(inner.height as usize)
            .map(|(index, row)| {
                let icon = match (row.kind.is_expandable(), row.is_expanded) {
                    (true, true) => "▾ ",
                    (true, false) => "▸ ",
                    (false, _) => "  ",
                };
                let fg = match row.kind {
                    NodeKind::Dir => self.theme.dir_fg,
                    NodeKind::Symlink { .. } => self.theme.symlink_fg,
                    NodeKind::File => self.theme.file_fg,
                };
                let mut style = Style::default().fg(fg);
                if Some(index) == selected {
                    style = style.bg(self.theme.selected_bg);
                    if focused {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                }
                let indent = "  ".repeat(row.depth as usize);
                Line::from(Span::styled(
                    format!("{indent}{icon}{}", row.name.to_string_lossy()),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_open_files(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusTarget::OpenFiles;
        let title = format!(" Open Files ({}) ", self.view.rows.len());
        let block = self.panel_block(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = &self.view.rows;
        self.open_files_selected = self.open_files_selected.min(rows.len().saturating_sub(1));
        let height = inner.height as usize;
        let first = util::scroll_to_keep(0, self.open_files_selected, height);

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(first)
            .take(height)
            .map(|(index, row)| {
                let marker = if row.modified { MODIFIED_MARKER } else { " " };
                let mut name_style = Style::default().fg(self.theme.file_fg);
                if row.is_current {
                    name_style = name_style.add_modifier(Modifier::BOLD);
                }
                let mut line = Line::from(vec![
                    Span::styled(marker, Style::default().fg(self.theme.modified_fg)),
                    Span::raw(" "),
                    Span::styled(
                        row.vcs_code.to_string(),
                        Style::default().fg(self.theme.vcs_color(row.vcs_code.kind())),
                    ),
                    Span::raw(" "),
                    Span::styled(row.name.clone(), name_style),
                    Span::raw("  "),
                    Span::styled(
                        row.path.display().to_string(),
                        Style::default().fg(self.theme.muted_fg),
                    ),
                ]);
                if index == self.open_files_selected && focused {
                    line = line.style(Style::default().bg(self.theme.selected_bg));
                }
                line
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusTarget::Editor;
        let title = match self.session.registry().current() {
            Some(entry) if entry.is_modified() => {
                format!(" {} {MODIFIED_MARKER} ", entry.file_name())
            }
            Some(entry) => format!(" {} ", entry.file_name()),
            None => " No file ".to_string(),
        };
        let block = self.panel_block(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let Some(entry) = self.session.registry().current() else {
            return;
        };
        let buffer = entry.buffer();
        let (cursor_line, cursor_col) = buffer.cursor();
        let height = inner.height as usize;
        self.editor_scroll = util::scroll_to_keep(self.editor_scroll, cursor_line, height);

        let lines: Vec<Line> = (self.editor_scroll..buffer.len_lines())
            .take(height)
            .filter_map(|row| buffer.line_slice(row))
            .map(|slice| {
                let text = slice_to_cow(slice);
                let text = text.trim_end_matches(['\n', '\r']);
                Line::from(text.to_string())
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if focused {
            let prefix_width = buffer
                .line_slice(cursor_line)
                .map(|slice| {
                    let text = slice_to_cow(slice);
                    text.graphemes(true)
                        .take(cursor_col)
                        .map(UnicodeWidthStr::width)
                        .sum::<usize>()
                })
                .unwrap_or(0);
            let row = cursor_line.saturating_sub(self.editor_scroll);
            if prefix_width < inner.width as usize && row < height {
                self.last_cursor = Some((inner.x + prefix_width as u16, inner.y + row as u16));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let view = &self.view;
        let style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        let text = if view.path.as_os_str().is_empty() {
            format!(" {} ", self.focus.label())
        } else {
            let modified = if view.modified { " [+]" } else { "" };
            format!(
                " {}{} | Ln {}, Col {} | {}% | {} | {} {} | {} | {}",
                view.path.display(),
                modified,
                view.line,
                view.column,
                view.percent,
                view.encoding,
                view.vcs.branch,
                view.vcs.commit,
                view.vcs.worktree,
                self.focus.label(),
            )
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect) {
        let Some(status) = self.session.status() else {
            return;
        };
        let fg = if status.is_error {
            self.theme.error_fg
        } else {
            self.theme.info_fg
        };
        frame.render_widget(
            Paragraph::new(status.text.as_str()).style(Style::default().fg(fg)),
            area,
        );
    }

    fn render_choice_dialog(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        message: &str,
        choices: &str,
    ) {
        let dialog_area = util::centered_rect(50, 6, area);
        if dialog_area.width < 20 || dialog_area.height < 3 {
            return;
        }
        frame.render_widget(Clear, dialog_area);

        let base_style = Style::default()
            .bg(self.theme.dialog_bg)
            .fg(self.theme.dialog_fg);
        let block = self
            .panel_block(format!(" {title} "), true)
            .style(base_style);
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let content = Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::raw(""),
            Line::from(Span::styled(
                choices.to_string(),
                Style::default().fg(self.theme.accent_fg),
            )),
        ])
        .style(base_style)
        .wrap(Wrap { trim: true });
        frame.render_widget(content, inner);
    }

    fn render_save_as_dialog(&mut self, frame: &mut Frame, area: Rect) {
        let Some(input) = self.save_as.as_deref() else {
            return;
        };
        let dialog_area = util::centered_rect(60, 5, area);
        if dialog_area.width < 20 || dialog_area.height < 3 {
            return;
        }
        frame.render_widget(Clear, dialog_area);

        let base_style = Style::default()
            .bg(self.theme.dialog_bg)
            .fg(self.theme.dialog_fg);
        let block = self
            .panel_block(" Save as ".to_string(), true)
            .style(base_style);
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Keep the end of a long path visible.
        let max = inner.width.saturating_sub(1) as usize;
        let mut visible = input;
        while visible.width() > max {
            let mut chars = visible.chars();
            chars.next();
            visible = chars.as_str();
        }
        let hint = Line::from(Span::styled(
            "[Enter] Save  [Esc] Cancel",
            Style::default().fg(self.theme.muted_fg),
        ));
        frame.render_widget(
            Paragraph::new(vec![Line::from(visible.to_string()), hint]).style(base_style),
            inner,
        );
        self.last_cursor = Some((inner.x + visible.width() as u16, inner.y));
    }
}
