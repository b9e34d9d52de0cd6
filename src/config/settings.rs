use std::collections::HashMap;

/// Editor settings, customizable via the Rhai init script.
#[derive(Debug, Clone)]
pub struct Settings {
    // Display
    pub theme: String,
    pub show_line_numbers: bool,
    pub tab_width: usize,
    pub file_tree_width: u16,
    pub show_hidden_files: bool,

    // Behavior
    pub autosave_secs: u64,

    // Interpreter overrides: extension -> binary (".py" -> "python3")
    pub interpreters: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "scriptbliss-dark".to_string(),
            show_line_numbers: true,
            tab_width: 4,
            file_tree_width: 28,
            show_hidden_files: false,

            autosave_secs: 30,

            interpreters: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }
}
