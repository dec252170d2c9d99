use ropey::{Rope, RopeSlice};

/// Script body being edited
pub struct Buffer {
    text: Rope,
}

impl Buffer {
    pub fn new() -> Self {
        Self { text: Rope::new() }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
        }
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    pub fn line(&self, idx: usize) -> RopeSlice<'_> {
        self.text.line(idx)
    }

    pub fn line_len(&self, idx: usize) -> usize {
        // Length excluding newline character
        let line = self.text.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        self.text.line_to_char(line) + col
    }

    fn char_to_line_col(&self, idx: usize) -> (usize, usize) {
        let line = self.text.char_to_line(idx);
        (line, idx - self.text.line_to_char(line))
    }

    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        let idx = self.line_col_to_char(line, col);
        self.text.insert_char(idx, ch);
    }

    /// Insert text and return the position just after it
    pub fn insert_str(&mut self, line: usize, col: usize, s: &str) -> (usize, usize) {
        let idx = self.line_col_to_char(line, col);
        self.text.insert(idx, s);
        self.char_to_line_col(idx + s.chars().count())
    }

    pub fn delete_char(&mut self, line: usize, col: usize) {
        let idx = self.line_col_to_char(line, col);
        if idx < self.text.len_chars() {
            self.text.remove(idx..idx + 1);
        }
    }

    /// Delete the character before the given position (backspace)
    pub fn delete_char_backward(&mut self, line: usize, col: usize) -> bool {
        let idx = self.line_col_to_char(line, col);
        if idx == 0 {
            return false;
        }
        self.text.remove(idx - 1..idx);
        true
    }

    pub fn insert_newline(&mut self, line: usize, col: usize) {
        self.insert_char(line, col, '\n');
    }

    /// Replace the whole text
    pub fn set_text(&mut self, s: &str) {
        self.text = Rope::from_str(s);
    }

    /// Position just past the last character
    pub fn end(&self) -> (usize, usize) {
        self.char_to_line_col(self.text.len_chars())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.line_count(), 1); // empty rope has 1 line
    }

    #[test]
    fn line_len_excludes_newline() {
        let buf = Buffer::from_text("hello\n\nworld");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 0);
        assert_eq!(buf.line_len(2), 5);
    }

    #[test]
    fn insert_str_reports_end_position() {
        let mut buf = Buffer::from_text("ab");
        let end = buf.insert_str(0, 1, "x\nyz");
        assert_eq!(buf.text(), "ax\nyzb");
        assert_eq!(end, (1, 2));
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buf = Buffer::from_text("one\ntwo");
        assert!(buf.delete_char_backward(1, 0));
        assert_eq!(buf.text(), "onetwo");
        assert!(!buf.delete_char_backward(0, 0));
    }

    #[test]
    fn end_is_after_last_char() {
        let buf = Buffer::from_text("one\ntwo");
        assert_eq!(buf.end(), (1, 3));
        assert_eq!(Buffer::from_text("x\n").end(), (1, 0));
    }
}
