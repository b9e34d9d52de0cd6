use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    execute, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::editor::{BottomTab, Editor, Mode};
use crate::syntax::HighlightKind;
use crate::theme::{Style, Theme};

const GUTTER_WIDTH: u16 = 5;

/// Fixed window layout: explorer on the left, editor beside it, the
/// Output/Terminal tab area below, status line at the bottom.
pub struct Renderer {
    pub width: u16,
    pub height: u16,
}

struct Layout {
    tree_width: u16,
    main_height: u16,
    bottom_top: u16,
    bottom_height: u16,
    status_row: u16,
}

impl Renderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(
            stdout(),
            SetCursorStyle::DefaultUserShape,
            Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn layout(&self, editor: &Editor) -> Layout {
        let tree_width = editor.settings.file_tree_width.min(self.width / 2);
        // One row of the bottom area is its tab bar
        let bottom_height = (self.height / 3).clamp(4, 14);
        let status_row = self.height.saturating_sub(1);
        let bottom_top = status_row.saturating_sub(bottom_height);
        Layout {
            tree_width,
            main_height: bottom_top,
            bottom_top,
            bottom_height,
            status_row,
        }
    }

    /// Editor pane height, for scroll adjustment
    pub fn text_height(&self, editor: &Editor) -> usize {
        self.layout(editor).main_height as usize
    }

    pub fn render(&self, editor: &Editor) -> io::Result<()> {
        let mut stdout = stdout();
        let theme = Theme::by_name(&editor.settings.theme);
        let layout = self.layout(editor);

        // Hide cursor during redraw to prevent flicker
        queue!(stdout, Hide)?;
        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;

        self.render_tree(&mut stdout, editor, &layout, &theme)?;
        self.render_editor_pane(&mut stdout, editor, &layout, &theme)?;
        self.render_bottom_tabs(&mut stdout, editor, &layout, &theme)?;
        self.render_status_line(&mut stdout, editor, &layout, &theme)?;
        self.position_cursor(&mut stdout, editor, &layout)?;

        stdout.flush()
    }

    fn render_tree(
        &self,
        stdout: &mut impl Write,
        editor: &Editor,
        layout: &Layout,
        theme: &Theme,
    ) -> io::Result<()> {
        let width = layout.tree_width as usize;
        let focused = editor.mode == Mode::Explorer;

        queue!(stdout, SetBackgroundColor(theme.tree_bg.to_crossterm()))?;

        // Title row
        queue!(stdout, MoveTo(0, 0))?;
        queue!(stdout, SetForegroundColor(theme.foreground.to_crossterm()))?;
        queue!(stdout, SetAttribute(Attribute::Bold))?;
        queue!(stdout, Print(pad(" Explorer", width)))?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;
        queue!(stdout, SetBackgroundColor(theme.tree_bg.to_crossterm()))?;

        for row in 1..layout.main_height {
            let idx = row as usize - 1;
            queue!(stdout, MoveTo(0, row))?;
            queue!(stdout, SetBackgroundColor(theme.tree_bg.to_crossterm()))?;

            let Some(entry) = editor.file_tree.entries.get(idx) else {
                queue!(stdout, Print(" ".repeat(width)))?;
                continue;
            };

            let selected = idx == editor.file_tree.selected;
            if selected && focused {
                queue!(
                    stdout,
                    SetBackgroundColor(theme.tree_selected.to_crossterm())
                )?;
                queue!(stdout, SetForegroundColor(theme.tree_bg.to_crossterm()))?;
            } else if entry.is_dir {
                queue!(stdout, SetForegroundColor(theme.tree_dir.to_crossterm()))?;
            } else {
                queue!(stdout, SetForegroundColor(theme.tree_file.to_crossterm()))?;
            }

            let marker = if entry.is_dir {
                if editor.file_tree.is_expanded(&entry.path) {
                    "▾ "
                } else {
                    "▸ "
                }
            } else {
                "  "
            };
            let line = format!("{}{}{}", "  ".repeat(entry.depth), marker, entry.name);
            queue!(stdout, Print(pad(&line, width)))?;
        }

        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
        Ok(())
    }

    fn render_editor_pane(
        &self,
        stdout: &mut impl Write,
        editor: &Editor,
        layout: &Layout,
        theme: &Theme,
    ) -> io::Result<()> {
        let pane_x = layout.tree_width;
        let text_width = self
            .width
            .saturating_sub(pane_x + GUTTER_WIDTH) as usize;
        let line_count = editor.buffer.line_count();

        for row in 0..layout.main_height {
            let line_idx = row as usize + editor.scroll_offset;
            queue!(stdout, MoveTo(pane_x, row))?;

            let is_cursor_line = line_idx == editor.cursor.line;
            let line_bg = if is_cursor_line {
                theme.cursor_line
            } else {
                theme.background
            };
            queue!(stdout, SetBackgroundColor(line_bg.to_crossterm()))?;

            if line_idx >= line_count {
                queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
                queue!(stdout, SetForegroundColor(theme.line_number.to_crossterm()))?;
                queue!(stdout, Print(pad("  ~", text_width + GUTTER_WIDTH as usize)))?;
                continue;
            }

            // Line number gutter
            let num_color = if is_cursor_line {
                theme.line_number_active
            } else {
                theme.line_number
            };
            queue!(stdout, SetForegroundColor(num_color.to_crossterm()))?;
            if editor.settings.show_line_numbers {
                queue!(stdout, Print(format!("{:>4} ", line_idx + 1)))?;
            } else {
                queue!(stdout, Print(" ".repeat(GUTTER_WIDTH as usize)))?;
            }

            // Line content with syntax colors
            let line = editor.buffer.line(line_idx).to_string();
            let content = line.trim_end_matches('\n');
            let spans = editor.highlighter.line_highlights(line_idx);

            let mut painted = 0usize;
            for (byte_idx, ch) in content.char_indices() {
                if painted >= text_width {
                    break;
                }
                let kind = spans
                    .map(|s| s.kind_at(byte_idx))
                    .unwrap_or(HighlightKind::Default);
                let style = style_for(kind, theme);
                queue!(stdout, SetForegroundColor(style.fg.to_crossterm()))?;
                if style.bold {
                    queue!(stdout, SetAttribute(Attribute::Bold))?;
                }
                if style.italic {
                    queue!(stdout, SetAttribute(Attribute::Italic))?;
                }
                queue!(stdout, Print(ch))?;
                if style.bold || style.italic {
                    queue!(stdout, SetAttribute(Attribute::Reset))?;
                    queue!(stdout, SetBackgroundColor(line_bg.to_crossterm()))?;
                }
                painted += 1;
            }
            if painted < text_width {
                queue!(stdout, Print(" ".repeat(text_width - painted)))?;
            }
        }

        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
        Ok(())
    }

    fn render_bottom_tabs(
        &self,
        stdout: &mut impl Write,
        editor: &Editor,
        layout: &Layout,
        theme: &Theme,
    ) -> io::Result<()> {
        // Tab bar
        queue!(stdout, MoveTo(0, layout.bottom_top))?;
        queue!(stdout, SetBackgroundColor(theme.tab_bar_bg.to_crossterm()))?;

        let mut used = 0usize;
        for tab in [BottomTab::Output, BottomTab::Terminal] {
            let active = editor.bottom_tab == tab;
            if active {
                queue!(
                    stdout,
                    SetBackgroundColor(theme.tab_active_bg.to_crossterm())
                )?;
                queue!(
                    stdout,
                    SetForegroundColor(theme.tab_active_fg.to_crossterm())
                )?;
            } else {
                queue!(stdout, SetBackgroundColor(theme.tab_bar_bg.to_crossterm()))?;
                queue!(stdout, SetForegroundColor(theme.tab_bar_fg.to_crossterm()))?;
            }
            let label = if active {
                format!(" [{}] ", tab.title())
            } else {
                format!("  {}  ", tab.title())
            };
            used += label.chars().count();
            queue!(stdout, Print(label))?;
        }
        queue!(stdout, SetBackgroundColor(theme.tab_bar_bg.to_crossterm()))?;
        if (used as u16) < self.width {
            queue!(stdout, Print(" ".repeat(self.width as usize - used)))?;
        }

        // Content: the tail of the active buffer
        let (bg, fg, text) = match editor.bottom_tab {
            BottomTab::Output => (theme.console_bg, theme.console_fg, editor.console.text()),
            BottomTab::Terminal => (theme.terminal_bg, theme.terminal_fg, editor.terminal.text()),
        };
        queue!(stdout, SetBackgroundColor(bg.to_crossterm()))?;
        queue!(stdout, SetForegroundColor(fg.to_crossterm()))?;

        let content_height = layout.bottom_height.saturating_sub(1) as usize;
        let lines: Vec<&str> = text.split('\n').collect();
        let first = lines.len().saturating_sub(content_height);

        for row in 0..content_height {
            queue!(stdout, MoveTo(0, layout.bottom_top + 1 + row as u16))?;
            let line = lines.get(first + row).copied().unwrap_or("");
            queue!(stdout, Print(pad(line, self.width as usize)))?;
        }

        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
        Ok(())
    }

    fn render_status_line(
        &self,
        stdout: &mut impl Write,
        editor: &Editor,
        layout: &Layout,
        theme: &Theme,
    ) -> io::Result<()> {
        queue!(stdout, MoveTo(0, layout.status_row))?;

        // Command mode - just show the command
        if editor.mode == Mode::Command {
            queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
            queue!(stdout, SetForegroundColor(theme.foreground.to_crossterm()))?;
            queue!(stdout, Clear(ClearType::CurrentLine))?;
            queue!(stdout, Print(format!(":{}", editor.command_buffer)))?;
            return Ok(());
        }

        // Message - show prominently
        if let Some(ref msg) = editor.message {
            queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
            queue!(stdout, SetForegroundColor(theme.warning.to_crossterm()))?;
            queue!(stdout, Clear(ClearType::CurrentLine))?;
            queue!(stdout, Print(msg))?;
            return Ok(());
        }

        queue!(
            stdout,
            SetBackgroundColor(theme.status_bar_bg.to_crossterm())
        )?;
        queue!(
            stdout,
            SetForegroundColor(theme.status_bar_fg.to_crossterm())
        )?;

        let filename = editor
            .buffer
            .path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let dirty = if editor.buffer.is_dirty() { " [+]" } else { "" };

        let left = format!(
            " {} | {}{} | {}",
            editor.mode.display(),
            filename,
            dirty,
            editor.highlighter.language().name()
        );
        let right = format!(" {}:{} ", editor.cursor.line + 1, editor.cursor.col + 1);

        let padding = (self.width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{}{}", left, " ".repeat(padding), right);
        let status: String = status.chars().take(self.width as usize).collect();

        queue!(stdout, Print(status))?;
        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
        Ok(())
    }

    fn position_cursor(
        &self,
        stdout: &mut impl Write,
        editor: &Editor,
        layout: &Layout,
    ) -> io::Result<()> {
        match editor.mode {
            Mode::Command => {
                let col = 1 + editor.command_buffer.chars().count() as u16;
                queue!(stdout, MoveTo(col, layout.status_row))?;
                queue!(stdout, SetCursorStyle::BlinkingBar)?;
                queue!(stdout, Show)?;
            }
            Mode::Terminal if editor.bottom_tab == BottomTab::Terminal => {
                // End of the terminal text, inside the bottom pane
                let lines: Vec<&str> = editor.terminal.text().split('\n').collect();
                let content_height = layout.bottom_height.saturating_sub(1) as usize;
                let first = lines.len().saturating_sub(content_height);
                let row = lines.len() - 1 - first;
                let col = lines.last().map(|l| l.chars().count()).unwrap_or(0);
                queue!(
                    stdout,
                    MoveTo(col as u16, layout.bottom_top + 1 + row as u16)
                )?;
                queue!(stdout, SetCursorStyle::BlinkingBar)?;
                queue!(stdout, Show)?;
            }
            Mode::Normal | Mode::Insert => {
                if editor.cursor.line >= editor.scroll_offset {
                    let x = layout.tree_width + GUTTER_WIDTH + editor.cursor.col as u16;
                    let y = (editor.cursor.line - editor.scroll_offset) as u16;
                    queue!(stdout, MoveTo(x, y))?;
                    let style = match editor.mode {
                        Mode::Insert => SetCursorStyle::BlinkingBar,
                        _ => SetCursorStyle::SteadyBlock,
                    };
                    queue!(stdout, style)?;
                    queue!(stdout, Show)?;
                }
            }
            _ => {
                queue!(stdout, Hide)?;
            }
        }
        Ok(())
    }
}

fn style_for(kind: HighlightKind, theme: &Theme) -> Style {
    match kind {
        HighlightKind::Keyword => theme.syntax_keyword,
        HighlightKind::String => theme.syntax_string,
        HighlightKind::Number => theme.syntax_number,
        HighlightKind::Comment => theme.syntax_comment,
        HighlightKind::Function => theme.syntax_function,
        HighlightKind::Type => theme.syntax_type,
        HighlightKind::Operator => theme.syntax_operator,
        HighlightKind::Punctuation => theme.syntax_punctuation,
        HighlightKind::Property => theme.syntax_property,
        HighlightKind::Constant => theme.syntax_constant,
        HighlightKind::Tag => theme.syntax_tag,
        HighlightKind::Default => Style::new(theme.foreground),
    }
}

/// Pad or truncate to an exact display width
fn pad(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    if len < width {
        out.push_str(&" ".repeat(width - len));
    }
    out
}
