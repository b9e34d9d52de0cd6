#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { line: 0, col: 0 }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        }
    }

    pub fn move_right(&mut self, line_len: usize) {
        if self.col < line_len {
            self.col += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.line > 0 {
            self.line -= 1;
        }
    }

    pub fn move_down(&mut self, line_count: usize) {
        if self.line + 1 < line_count {
            self.line += 1;
        }
    }

    /// Pull the column back inside the current line after a vertical move.
    pub fn clamp_col(&mut self, line_len: usize) {
        if self.col > line_len {
            self.col = line_len;
        }
    }
}
