use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use rhai::{AST, Engine, Scope};

use super::Settings;

/// The Rhai scripting engine for configuration
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
    ast: Option<AST>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self {
            engine,
            settings,
            ast: None,
        }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_theme", move |name: &str| {
                if let Ok(mut settings) = s.write() {
                    settings.theme = name.to_string();
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_tab_width", move |width: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.tab_width = width.clamp(1, 16) as usize;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_show_line_numbers", move |enabled: bool| {
                if let Ok(mut settings) = s.write() {
                    settings.show_line_numbers = enabled;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_show_hidden_files", move |enabled: bool| {
                if let Ok(mut settings) = s.write() {
                    settings.show_hidden_files = enabled;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_file_tree_width", move |width: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.file_tree_width = width.clamp(10, 80) as u16;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_autosave_secs", move |secs: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.autosave_secs = secs.max(1) as u64;
                }
            });
        }

        // Map a source extension to the interpreter binary that runs it,
        // e.g. set_interpreter(".py", "python3")
        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_interpreter", move |ext: &str, program: &str| {
                if let Ok(mut settings) = s.write() {
                    settings
                        .interpreters
                        .insert(ext.to_string(), program.to_string());
                }
            });
        }

        engine.register_fn("print", |msg: &str| {
            // Config scripts have nowhere sensible to print to
            let _ = msg;
        });

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &PathBuf) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        self.eval(&content)
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| format!("Config parse error: {}", e))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| format!("Config error: {}", e))?;

        self.ast = Some(ast);
        Ok(())
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scriptbliss"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), String> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_theme_updates_settings() {
        let mut engine = ConfigEngine::new();
        engine.eval(r#"set_theme("gruvbox-dark");"#).unwrap();
        assert_eq!(engine.settings().theme, "gruvbox-dark");
    }

    #[test]
    fn tab_width_is_clamped() {
        let mut engine = ConfigEngine::new();
        engine.eval("set_tab_width(100);").unwrap();
        assert_eq!(engine.settings().tab_width, 16);
    }

    #[test]
    fn interpreter_override_is_recorded() {
        let mut engine = ConfigEngine::new();
        engine
            .eval(r#"set_interpreter(".py", "python3");"#)
            .unwrap();
        assert_eq!(
            engine.settings().interpreters.get(".py"),
            Some(&"python3".to_string())
        );
    }

    #[test]
    fn autosave_interval_has_a_floor() {
        let mut engine = ConfigEngine::new();
        engine.eval("set_autosave_secs(0);").unwrap();
        assert_eq!(engine.settings().autosave_secs, 1);
    }

    #[test]
    fn bad_script_reports_a_parse_error() {
        let mut engine = ConfigEngine::new();
        assert!(engine.eval("set_theme(").is_err());
    }

    #[test]
    fn multiple_settings_in_one_script() {
        let mut engine = ConfigEngine::new();
        engine
            .eval(
                r#"
                set_theme("scriptbliss-dark");
                set_show_hidden_files(true);
                set_file_tree_width(40);
            "#,
            )
            .unwrap();

        let settings = engine.settings();
        assert_eq!(settings.theme, "scriptbliss-dark");
        assert!(settings.show_hidden_files);
        assert_eq!(settings.file_tree_width, 40);
    }
}
