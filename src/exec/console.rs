//! The two bottom-tab text buffers: the append-only Output console and the
//! editable Terminal scrollback.

/// Append-only sink backing the Output tab. Chunks land in arrival order
/// and are never reordered or truncated.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    text: String,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    /// Append a chunk followed by a newline.
    pub fn append_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Editable pseudo-shell buffer. The last line is the pending command; the
/// rest is scrollback and stays put.
#[derive(Debug, Default)]
pub struct TerminalBuffer {
    text: String,
}

impl TerminalBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The line a submit event would treat as the entered command.
    pub fn last_line(&self) -> &str {
        self.text.rsplit('\n').next().unwrap_or("")
    }

    /// Append a block of output as a new paragraph, leaving the typed
    /// command above it in the scrollback.
    pub fn append_block(&mut self, block: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(block);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
