use crate::errors::ConcatError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    "venv",
    ".git",
    "__pycache__",
    "dist",
    "build",
    "env",
    ".idea",
    ".vscode",
];

pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".py", ".js", ".java", ".cpp", ".c", ".cs", ".html", ".css", ".json", ".xml",
    ".rb", ".go", ".ts", ".swift", ".php", ".sh", ".bat", ".pl",
];

/// Persisted preferences: three string lists in a JSON file. The engine never
/// reads this itself; it only receives the lists through `SelectionRequest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    #[serde(default)]
    pub ignore_files: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ignore_dirs: default_ignore_dirs(),
            ignore_files: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

impl Settings {
    /// Missing file yields the defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConcatError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConcatError::SettingsError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConcatError::SettingsError(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConcatError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| ConcatError::SettingsError(e.to_string()))?;
        std::fs::write(path, raw)
            .map_err(|e| ConcatError::SettingsError(format!("{}: {}", path.display(), e)))
    }
}

/// Extensions compare lower-cased and dot-prefixed; this brings hand-typed
/// values (CLI flags, hand-edited settings files) into that form.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

fn default_ignore_dirs() -> Vec<String> {
    DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
