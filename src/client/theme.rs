use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::{ json, Value };

/// Fixed key the display preference is stored under.
pub const THEME_KEY: &str = "darkMode";

/// Persists the single boolean display preference in a small JSON document,
/// the local-storage analog for the chat widget. Read once at mount, written
/// on toggle; has no effect on the relay contract.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing, unreadable, or corrupt files read as the light theme.
    pub fn load(&self) -> bool {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
            .and_then(|doc| doc.get(THEME_KEY).and_then(Value::as_bool))
            .unwrap_or(false)
    }

    pub fn save(&self, dark_mode: bool) -> io::Result<()> {
        let doc = json!({ THEME_KEY: dark_mode });
        fs::write(&self.path, doc.to_string())
    }
}
