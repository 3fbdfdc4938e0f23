use ropey::Rope;
use unicode_width::UnicodeWidthChar;

use crate::controller::{CursorPlacement, TextWidget};

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A rope-backed text area.
///
/// The cursor is a char index into the rope; it never sits inside a
/// `\r\n` pair. Vertical moves remember the column they started from.
#[derive(Debug, Clone)]
pub struct TextArea {
    rope: Rope,
    cursor: usize,
    goal_col: Option<usize>,
    scroll_top: usize,
    tab_width: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
            goal_col: None,
            scroll_top: 0,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Number of lines; an empty buffer has one.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line ending.
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line_idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// `(line, col)` of the cursor, both zero-based, col in chars.
    pub fn cursor(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.cursor);
        (line, self.cursor - self.rope.line_to_char(line))
    }

    /// First line shown in the viewport.
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
        self.goal_col = None;
    }

    /// Insert pasted text. Terminal pastes use `\r` for line breaks.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.rope.insert(self.cursor, &normalized);
        self.cursor += normalized.chars().count();
        self.goal_col = None;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Insert spaces up to the next tab stop.
    pub fn insert_tab(&mut self) {
        let (line, col) = self.cursor();
        let text = self.line(line).unwrap_or_default();
        let width = display_width(&text, col, self.tab_width);
        let pad = self.tab_width - (width % self.tab_width);
        self.insert_text(&" ".repeat(pad));
    }

    /// Delete the char before the cursor, joining lines at column 0.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let (line, col) = self.cursor();
        let start = if col == 0 {
            // Remove the whole line ending of the previous line.
            self.line_content_end(line - 1)
        } else {
            self.cursor - 1
        };
        self.rope.remove(start..self.cursor);
        self.cursor = start;
        self.goal_col = None;
        true
    }

    /// Delete the char under the cursor, joining lines at line end.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let (line, col) = self.cursor();
        let end = if col >= self.line_len(line) {
            if line + 1 >= self.line_count() {
                return false;
            }
            self.rope.line_to_char(line + 1)
        } else {
            self.cursor + 1
        };
        self.rope.remove(self.cursor..end);
        self.goal_col = None;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let (line, col) = self.cursor();
        match direction {
            Direction::Left => {
                if col > 0 {
                    self.set_cursor(line, col - 1);
                } else if line > 0 {
                    self.set_cursor(line - 1, self.line_len(line - 1));
                }
            }
            Direction::Right => {
                if col < self.line_len(line) {
                    self.set_cursor(line, col + 1);
                } else if line + 1 < self.line_count() {
                    self.set_cursor(line + 1, 0);
                }
            }
            Direction::Up => {
                if line > 0 {
                    self.move_vertically(line - 1, col);
                }
            }
            Direction::Down => {
                if line + 1 < self.line_count() {
                    self.move_vertically(line + 1, col);
                }
            }
        }
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.cursor();
        self.set_cursor(line, 0);
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.cursor();
        self.set_cursor(line, self.line_len(line));
    }

    pub fn move_to_start(&mut self) {
        self.set_cursor(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count() - 1;
        self.set_cursor(last, self.line_len(last));
    }

    /// Move to `(line, col)`, clamped to the buffer.
    #[cfg(test)]
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count() - 1);
        self.set_cursor(line, col);
    }

    /// Place the cursor on `line` at the char under display column `column`.
    pub fn move_to_display_column(&mut self, line: usize, column: usize) {
        let line = line.min(self.line_count() - 1);
        let text = self.line(line).unwrap_or_default();
        let col = char_col_at_display(&text, column, self.tab_width);
        self.set_cursor(line, col);
    }

    pub fn page_up(&mut self, height: usize) {
        let (line, col) = self.cursor();
        let step = height.max(1);
        self.scroll_top = self.scroll_top.saturating_sub(step);
        self.move_vertically(line.saturating_sub(step), col);
    }

    pub fn page_down(&mut self, height: usize) {
        let (line, col) = self.cursor();
        let step = height.max(1);
        let last = self.line_count() - 1;
        self.scroll_top = (self.scroll_top + step).min(last);
        self.move_vertically((line + step).min(last), col);
    }

    pub const fn scroll_up(&mut self, lines: usize) {
        self.scroll_top = self.scroll_top.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let last = self.line_count() - 1;
        self.scroll_top = (self.scroll_top + lines).min(last);
    }

    /// Adjust the scroll so the cursor line is within `height` rows.
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        let (line, _) = self.cursor();
        if height == 0 {
            self.scroll_top = line;
        } else if line < self.scroll_top {
            self.scroll_top = line;
        } else if line >= self.scroll_top + height {
            self.scroll_top = line + 1 - height;
        }
    }

    /// Display column of the cursor on its line (tabs expanded, wide chars counted).
    pub fn cursor_display_column(&self) -> usize {
        let (line, col) = self.cursor();
        let text = self.line(line).unwrap_or_default();
        display_width(&text, col, self.tab_width)
    }

    fn line_len(&self, line_idx: usize) -> usize {
        self.line(line_idx).map_or(0, |s| s.chars().count())
    }

    fn line_content_end(&self, line_idx: usize) -> usize {
        self.rope.line_to_char(line_idx) + self.line_len(line_idx)
    }

    fn set_cursor(&mut self, line: usize, col: usize) {
        let col = col.min(self.line_len(line));
        self.cursor = self.rope.line_to_char(line) + col;
        self.goal_col = None;
    }

    fn move_vertically(&mut self, target_line: usize, current_col: usize) {
        let goal = self.goal_col.unwrap_or(current_col);
        self.set_cursor(target_line, goal);
        self.goal_col = Some(goal);
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWidget for TextArea {
    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn set_value(&mut self, text: &str, cursor: CursorPlacement) {
        self.rope = Rope::from_str(text);
        self.goal_col = None;
        match cursor {
            CursorPlacement::Start => {
                self.cursor = 0;
                self.scroll_top = 0;
            }
            #[cfg(test)]
            CursorPlacement::End => self.move_to_end(),
        }
    }
}

/// Display width of the first `chars` chars of `text`.
pub fn display_width(text: &str, chars: usize, tab_width: usize) -> usize {
    text.chars()
        .take(chars)
        .fold(0, |width, ch| width + char_width(ch, width, tab_width))
}

/// Expand tabs to spaces so a line can be drawn cell-for-cell.
pub fn expand_tabs(text: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut width = 0;
    for ch in text.chars() {
        let w = char_width(ch, width, tab_width);
        if ch == '\t' {
            out.extend(std::iter::repeat_n(' ', w));
        } else {
            out.push(ch);
        }
        width += w;
    }
    out
}

fn char_col_at_display(text: &str, column: usize, tab_width: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in text.chars().enumerate() {
        let w = char_width(ch, width, tab_width);
        if column < width + w.max(1) {
            return idx;
        }
        width += w;
    }
    text.chars().count()
}

fn char_width(ch: char, at: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - (at % tab_width)
    } else {
        ch.width().unwrap_or(0)
    }
}
