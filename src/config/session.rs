//! Session persistence: remembers the project root and last open file
//! between runs, as a small JSON state file in the config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::ConfigEngine;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub project_root: Option<PathBuf>,
    pub last_file: Option<PathBuf>,
}

impl SessionState {
    /// Load the saved session, falling back to an empty one.
    pub fn load() -> Self {
        let Some(path) = Self::state_path() else {
            return Self::default();
        };
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(state) = serde_json::from_str(&content) {
                return state;
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::state_path().ok_or("No config directory available")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize session: {}", e))?;

        fs::write(&path, content).map_err(|e| format!("Failed to write session: {}", e))
    }

    fn state_path() -> Option<PathBuf> {
        ConfigEngine::config_dir().map(|dir| dir.join("session.json"))
    }
}
