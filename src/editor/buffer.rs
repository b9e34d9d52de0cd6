use ropey::Rope;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

/// Rope-backed text buffer for the editor pane.
pub struct Buffer {
    text: Rope,
    filepath: Option<PathBuf>,
    dirty: bool,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            filepath: None,
            dirty: false,
        }
    }

    pub fn from_file(path: PathBuf) -> io::Result<Self> {
        let text = Rope::from_reader(File::open(&path)?)?;
        Ok(Self {
            text,
            filepath: Some(path),
            dirty: false,
        })
    }

    /// Create a buffer from a string (useful for testing)
    #[cfg(test)]
    pub fn from_text(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
            filepath: None,
            dirty: false,
        }
    }

    pub fn save(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        match &self.filepath {
            Some(path) => {
                let mut file = File::create(path)?;
                self.text.write_to(&mut file)?;
                self.dirty = false;
                Ok(())
            }
            None => Err(io::Error::other("No file path")),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    /// Point the buffer at a new path (after a rename on disk).
    pub fn set_path(&mut self, path: PathBuf) {
        self.filepath = Some(path);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Full contents as a string, for the syntax parser.
    pub fn contents(&self) -> String {
        self.text.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    pub fn line(&self, idx: usize) -> ropey::RopeSlice {
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

    /// Get character at position, returns None if out of bounds
    pub fn char_at(&self, line: usize, col: usize) -> Option<char> {
        if line >= self.line_count() {
            return None;
        }
        let rope_line = self.text.line(line);
        if col >= rope_line.len_chars() {
            return None;
        }
        Some(rope_line.char(col))
    }

    fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        self.text.line_to_char(line) + col
    }

    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        let idx = self.line_col_to_char(line, col);
        self.text.insert_char(idx, ch);
        self.dirty = true;
    }

    pub fn delete_char(&mut self, line: usize, col: usize) {
        let idx = self.line_col_to_char(line, col);
        if idx < self.text.len_chars() {
            self.text.remove(idx..idx + 1);
            self.dirty = true;
        }
    }

    /// Delete the character before the given position (backspace)
    pub fn delete_char_backward(&mut self, line: usize, col: usize) {
        if col > 0 {
            self.delete_char(line, col - 1);
        } else if line > 0 {
            // At start of line, join with previous line
            let idx = self.line_col_to_char(line, 0);
            if idx > 0 {
                self.text.remove(idx - 1..idx);
                self.dirty = true;
            }
        }
    }

    pub fn insert_newline(&mut self, line: usize, col: usize) {
        self.insert_char(line, col, '\n');
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
    fn new_buffer_is_empty_and_clean() {
        let buf = Buffer::new();
        assert_eq!(buf.line_count(), 1); // empty rope has 1 line
        assert!(!buf.is_dirty());
        assert!(buf.path().is_none());
    }

    #[test]
    fn from_file_propagates_missing_file() {
        assert!(Buffer::from_file(PathBuf::from("/no/such/file.py")).is_err());
    }

    #[test]
    fn line_len_excludes_newline() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 5);
    }

    #[test]
    fn insert_char_marks_dirty() {
        let mut buf = Buffer::from_text("ab");
        buf.insert_char(0, 1, 'x');
        assert!(buf.is_dirty());
        assert_eq!(buf.line(0).to_string(), "axb");
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buf = Buffer::from_text("ab\ncd");
        buf.delete_char_backward(1, 0);
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0).to_string(), "abcd");
    }

    #[test]
    fn contents_round_trips_the_text() {
        let buf = Buffer::from_text("def f():\n    pass\n");
        assert_eq!(buf.contents(), "def f():\n    pass\n");
    }

    #[test]
    fn save_without_path_is_an_error() {
        let mut buf = Buffer::from_text("x");
        buf.insert_char(0, 0, 'y');
        assert!(buf.save().is_err());
    }
}
