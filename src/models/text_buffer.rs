//! Text buffer model.
//!
//! - Rope-backed storage
//! - Cursor as (line, grapheme column), both 0-based
//! - Modified flag owned by the buffer, cleared by the caller after a save

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Borrow the slice as `&str` when it is contiguous, copy otherwise.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
    modified: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
            modified: false,
        }
    }

    pub fn serialize(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Clamps to the last line and to the line's grapheme length.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.len_lines().saturating_sub(1));
        let col = col.min(self.line_grapheme_len(row));
        self.cursor = (row, col);
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_slice(&self, row: usize) -> Option<RopeSlice<'_>> {
        if row < self.rope.len_lines() {
            Some(self.rope.line(row))
        } else {
            None
        }
    }

    pub fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        self.rope.line_to_char(pos.0) + self.grapheme_to_char_index(pos.0, pos.1)
    }

    pub fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let line = slice_to_cow(self.rope.line(row));
        line.graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        let Some(slice) = self.line_slice(row) else {
            return 0;
        };
        let line = slice_to_cow(slice);
        let without_newline = line.strip_suffix('\n').unwrap_or(&line);
        let without_newline = without_newline.strip_suffix('\r').unwrap_or(without_newline);
        without_newline.graphemes(true).count()
    }

    // ==================== edits ====================

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let (row, col) = self.cursor;
        let char_offset = self.pos_to_char((row, col));
        let line_start = self.rope.line_to_char(row);
        self.rope.insert(char_offset, s);

        // Recompute the column from the text before the cursor so combining marks
        // merge into the previous grapheme instead of advancing it.
        let end_char = char_offset + s.chars().count();
        let new_row = self.rope.char_to_line(end_char);
        let new_line_start = if new_row == row {
            line_start
        } else {
            self.rope.line_to_char(new_row)
        };
        let prefix = self.rope.slice(new_line_start..end_char).to_string();
        self.cursor = (new_row, prefix.graphemes(true).count());
        self.modified = true;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Backspace. Joins with the previous line at column 0.
    pub fn delete_backward(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            let start = self.pos_to_char((row, col - 1));
            let end = self.pos_to_char((row, col));
            self.rope.remove(start..end);
            self.cursor = (row, col - 1);
        } else if row > 0 {
            let prev_len = self.line_grapheme_len(row - 1);
            let end = self.rope.line_to_char(row);
            let mut start = end - 1;
            if start > 0 && self.rope.char(start - 1) == '\r' {
                start -= 1;
            }
            self.rope.remove(start..end);
            self.cursor = (row - 1, prev_len);
        } else {
            return false;
        }
        self.modified = true;
        true
    }

    /// Delete key. Joins with the next line at end of line.
    pub fn delete_forward(&mut self) -> bool {
        let (row, col) = self.cursor;
        let line_len = self.line_grapheme_len(row);
        if col < line_len {
            let start = self.pos_to_char((row, col));
            let end = self.pos_to_char((row, col + 1));
            self.rope.remove(start..end);
        } else if row + 1 < self.len_lines() {
            let start = self.pos_to_char((row, col));
            let end = self.rope.line_to_char(row + 1);
            self.rope.remove(start..end);
        } else {
            return false;
        }
        self.modified = true;
        true
    }

    // ==================== cursor motion ====================

    pub fn move_left(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
        } else if row > 0 {
            self.cursor = (row - 1, self.line_grapheme_len(row - 1));
        }
    }

    pub fn move_right(&mut self) {
        let (row, col) = self.cursor;
        if col < self.line_grapheme_len(row) {
            self.cursor = (row, col + 1);
        } else if row + 1 < self.len_lines() {
            self.cursor = (row + 1, 0);
        }
    }

    pub fn move_up(&mut self) {
        let (row, col) = self.cursor;
        if row > 0 {
            self.set_cursor(row - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (row, col) = self.cursor;
        if row + 1 < self.len_lines() {
            self.set_cursor(row + 1, col);
        }
    }

    pub fn move_line_start(&mut self) {
        self.cursor.1 = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor.1 = self.line_grapheme_len(self.cursor.0);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
