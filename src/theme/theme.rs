use super::Color;

/// Style for a syntax element (color + attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub const fn new(fg: Color) -> Self {
        Self {
            fg,
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Editor chrome
    pub background: Color,
    pub foreground: Color,
    pub cursor_line: Color,
    pub line_number: Color,
    pub line_number_active: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    // Bottom tab bar
    pub tab_bar_bg: Color,
    pub tab_bar_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,

    // Explorer
    pub tree_bg: Color,
    pub tree_dir: Color,
    pub tree_file: Color,
    pub tree_selected: Color,

    // Output console and terminal
    pub console_bg: Color,
    pub console_fg: Color,
    pub terminal_bg: Color,
    pub terminal_fg: Color,

    // Syntax highlighting
    pub syntax_keyword: Style,
    pub syntax_string: Style,
    pub syntax_number: Style,
    pub syntax_comment: Style,
    pub syntax_function: Style,
    pub syntax_type: Style,
    pub syntax_operator: Style,
    pub syntax_punctuation: Style,
    pub syntax_property: Style,
    pub syntax_constant: Style,
    pub syntax_tag: Style,

    pub warning: Color,
}

fn hex(code: &str) -> Color {
    Color::from_hex(code).unwrap_or_default()
}

impl Theme {
    /// The house dark-blue theme.
    pub fn scriptbliss_dark() -> Self {
        Self {
            name: "scriptbliss-dark".to_string(),
            background: hex("#141428"),
            foreground: hex("#e0e0ff"),
            cursor_line: hex("#1e1e3e"),
            line_number: hex("#6a6a9a"),
            line_number_active: hex("#ffffff"),
            status_bar_bg: hex("#1e1e3e"),
            status_bar_fg: hex("#e0e0ff"),

            tab_bar_bg: hex("#1e1e3e"),
            tab_bar_fg: hex("#e0e0ff"),
            tab_active_bg: hex("#2e2e5e"),
            tab_active_fg: hex("#ffffff"),

            tree_bg: hex("#1e1e3e"),
            tree_dir: hex("#2a82da"),
            tree_file: hex("#e0e0ff"),
            tree_selected: hex("#2a82da"),

            console_bg: hex("#00091a"),
            console_fg: hex("#c9dcff"),
            terminal_bg: hex("#00092a"),
            terminal_fg: hex("#c9dcff"),

            syntax_keyword: Style::new(hex("#569cd6")).bold(),
            syntax_string: Style::new(hex("#ce9178")),
            syntax_number: Style::new(hex("#b5cea8")),
            syntax_comment: Style::new(hex("#6a9955")).italic(),
            syntax_function: Style::new(hex("#dcdcaa")),
            syntax_type: Style::new(hex("#4ec9b0")),
            syntax_operator: Style::new(hex("#d4d4d4")),
            syntax_punctuation: Style::new(hex("#808080")),
            syntax_property: Style::new(hex("#9cdcfe")),
            syntax_constant: Style::new(hex("#4fc1ff")),
            syntax_tag: Style::new(hex("#569cd6")),

            warning: hex("#fabd2f"),
        }
    }

    /// Gruvbox Dark - warm retro alternative
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark".to_string(),
            background: hex("#282828"),
            foreground: hex("#ebdbb2"),
            cursor_line: hex("#3c3836"),
            line_number: hex("#665c54"),
            line_number_active: hex("#fabd2f"),
            status_bar_bg: hex("#3c3836"),
            status_bar_fg: hex("#ebdbb2"),

            tab_bar_bg: hex("#1d2021"),
            tab_bar_fg: hex("#a89984"),
            tab_active_bg: hex("#3c3836"),
            tab_active_fg: hex("#ebdbb2"),

            tree_bg: hex("#1d2021"),
            tree_dir: hex("#83a598"),
            tree_file: hex("#ebdbb2"),
            tree_selected: hex("#fe8019"),

            console_bg: hex("#1d2021"),
            console_fg: hex("#ebdbb2"),
            terminal_bg: hex("#1d2021"),
            terminal_fg: hex("#ebdbb2"),

            syntax_keyword: Style::new(hex("#fb4934")).bold(),
            syntax_string: Style::new(hex("#b8bb26")),
            syntax_number: Style::new(hex("#d3869b")),
            syntax_comment: Style::new(hex("#928374")).italic(),
            syntax_function: Style::new(hex("#fabd2f")),
            syntax_type: Style::new(hex("#83a598")),
            syntax_operator: Style::new(hex("#ebdbb2")),
            syntax_punctuation: Style::new(hex("#a89984")),
            syntax_property: Style::new(hex("#8ec07c")),
            syntax_constant: Style::new(hex("#d3869b")),
            syntax_tag: Style::new(hex("#fb4934")),

            warning: hex("#fabd2f"),
        }
    }

    /// Resolve a theme by name, falling back to the house theme.
    pub fn by_name(name: &str) -> Self {
        match name {
            "gruvbox-dark" => Self::gruvbox_dark(),
            _ => Self::scriptbliss_dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::scriptbliss_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_resolves_known_themes() {
        assert_eq!(Theme::by_name("gruvbox-dark").name, "gruvbox-dark");
        assert_eq!(Theme::by_name("scriptbliss-dark").name, "scriptbliss-dark");
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(Theme::by_name("no-such-theme").name, "scriptbliss-dark");
    }

    #[test]
    fn console_uses_the_dark_blue_palette() {
        let theme = Theme::scriptbliss_dark();
        assert_eq!(theme.console_bg, Color::rgb(0, 9, 26));
        assert_eq!(theme.terminal_bg, Color::rgb(0, 9, 42));
    }
}
