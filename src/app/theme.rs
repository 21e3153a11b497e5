//! Colours used by the workbench, resolved from the `theme` setting.

use crate::kernel::FileStatusKind;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub focus_border: Color,
    pub inactive_border: Color,
    pub header_fg: Color,
    pub dir_fg: Color,
    pub symlink_fg: Color,
    pub file_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub modified_fg: Color,
    pub muted_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub error_fg: Color,
    pub info_fg: Color,
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub accent_fg: Color,
    pub vcs_added_fg: Color,
    pub vcs_modified_fg: Color,
    pub vcs_deleted_fg: Color,
    pub vcs_untracked_fg: Color,
    pub vcs_conflict_fg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("QUILL_COLOR_SUPPORT") {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") || term.contains("direct") {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            focus_border: Color::Indexed(6),    // Cyan
            inactive_border: Color::Indexed(8), // DarkGray
            header_fg: Color::Indexed(6),
            dir_fg: Color::Indexed(2),     // Green
            symlink_fg: Color::Indexed(4), // Blue
            file_fg: Color::Reset,
            selected_bg: Color::Indexed(8),
            selected_fg: Color::Indexed(15),
            modified_fg: Color::Indexed(3), // Yellow
            muted_fg: Color::Indexed(8),
            status_bg: Color::Indexed(4),
            status_fg: Color::Indexed(15),
            error_fg: Color::Indexed(1),
            info_fg: Color::Indexed(7),
            dialog_bg: Color::Reset,
            dialog_fg: Color::Indexed(15),
            accent_fg: Color::Indexed(3),
            vcs_added_fg: Color::Indexed(2),
            vcs_modified_fg: Color::Indexed(3),
            vcs_deleted_fg: Color::Indexed(1),
            vcs_untracked_fg: Color::Indexed(8),
            vcs_conflict_fg: Color::Indexed(5),
        }
    }
}

impl UiTheme {
    /// Unknown names fall back to the default palette.
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "monokai" => Self {
                focus_border: Color::Rgb(0xA6, 0xE2, 0x2E),
                header_fg: Color::Rgb(0x66, 0xD9, 0xEF),
                dir_fg: Color::Rgb(0xA6, 0xE2, 0x2E),
                symlink_fg: Color::Rgb(0x66, 0xD9, 0xEF),
                modified_fg: Color::Rgb(0xFD, 0x97, 0x1F),
                status_bg: Color::Rgb(0x3E, 0x3D, 0x32),
                status_fg: Color::Rgb(0xF8, 0xF8, 0xF2),
                error_fg: Color::Rgb(0xF9, 0x26, 0x72),
                accent_fg: Color::Rgb(0xE6, 0xDB, 0x74),
                vcs_conflict_fg: Color::Rgb(0xAE, 0x81, 0xFF),
                ..Self::default()
            },
            "light" => Self {
                file_fg: Color::Indexed(0),
                selected_bg: Color::Indexed(7),
                selected_fg: Color::Indexed(0),
                dialog_fg: Color::Indexed(0),
                info_fg: Color::Indexed(8),
                ..Self::default()
            },
            "default" => Self::default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::default()
            }
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for color in [
            &mut self.focus_border,
            &mut self.inactive_border,
            &mut self.header_fg,
            &mut self.dir_fg,
            &mut self.symlink_fg,
            &mut self.file_fg,
            &mut self.selected_bg,
            &mut self.selected_fg,
            &mut self.modified_fg,
            &mut self.muted_fg,
            &mut self.status_bg,
            &mut self.status_fg,
            &mut self.error_fg,
            &mut self.info_fg,
            &mut self.dialog_bg,
            &mut self.dialog_fg,
            &mut self.accent_fg,
            &mut self.vcs_added_fg,
            &mut self.vcs_modified_fg,
            &mut self.vcs_deleted_fg,
            &mut self.vcs_untracked_fg,
            &mut self.vcs_conflict_fg,
        ] {
            *color = map_color_for_support(*color, support);
        }
    }

    pub fn vcs_color(&self, kind: Option<FileStatusKind>) -> Color {
        match kind {
            None => self.muted_fg,
            Some(FileStatusKind::Added) | Some(FileStatusKind::Renamed) => self.vcs_added_fg,
            Some(FileStatusKind::Modified) => self.vcs_modified_fg,
            Some(FileStatusKind::Deleted) => self.vcs_deleted_fg,
            Some(FileStatusKind::Untracked) => self.vcs_untracked_fg,
            Some(FileStatusKind::Conflict) => self.vcs_conflict_fg,
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    match support {
        TerminalColorSupport::TrueColor => color,
        TerminalColorSupport::Ansi256 => Color::Indexed(rgb_to_ansi256(r, g, b)),
        TerminalColorSupport::Ansi16 => Color::Indexed(rgb_to_ansi16(r, g, b)),
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r as u16 - 8) * 24 / 247) as u8;
    }
    let level = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let bright = r.max(g).max(b) > 0xC0;
    let bit = |c: u8| u8::from(c > 0x60);
    let base = bit(r) | (bit(g) << 1) | (bit(b) << 2);
    if bright && base != 0 {
        base + 8
    } else {
        base
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
