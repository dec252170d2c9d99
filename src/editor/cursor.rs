/// Caret position in the body, in lines and characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { line: 0, col: 0 }
    }

    pub fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self, line_len: usize) {
        self.col = (self.col + 1).min(line_len);
    }

    pub fn move_up(&mut self) {
        self.line = self.line.saturating_sub(1);
    }

    pub fn move_down(&mut self, line_count: usize) {
        self.line = (self.line + 1).min(line_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_moves_stay_in_line() {
        let mut cursor = Cursor::at(0, 9);
        cursor.move_right(10);
        cursor.move_right(10);
        assert_eq!(cursor.col, 10);
        let mut cursor = Cursor::new();
        cursor.move_left();
        assert_eq!(cursor.col, 0);
    }

    #[test]
    fn vertical_moves_stay_in_buffer() {
        let mut cursor = Cursor::at(8, 0);
        cursor.move_down(10);
        cursor.move_down(10);
        assert_eq!(cursor.line, 9);
        let mut cursor = Cursor::new();
        cursor.move_up();
        assert_eq!(cursor.line, 0);
    }
}
