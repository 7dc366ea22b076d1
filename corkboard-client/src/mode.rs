/// Persisted mode selection
///
/// The client runs either fully offline against the local store or
/// against the remote API. The choice is an explicit two-valued setting
/// persisted across sessions; nothing switches modes implicitly.
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which backend serves the client's operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Local embedded store, fully offline
    #[default]
    Local,

    /// Remote REST API
    Remote,
}

impl Mode {
    /// Mode as string for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Local => "local",
            Mode::Remote => "remote",
        }
    }
}

/// Persisted settings file contents
#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default)]
    mode: Mode,
}

/// Error type for settings persistence
#[derive(Debug, thiserror::Error)]
#[error("Settings storage failed: {0}")]
pub struct SettingsError(String);

/// Loads the persisted mode; a missing or unreadable file means local
///
/// Corrupt settings never keep the client from starting.
pub fn load_mode(path: &Path) -> Mode {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<Settings>(&raw).ok())
        .map(|settings| settings.mode)
        .unwrap_or_default()
}

/// Persists the mode for the next session
///
/// # Errors
///
/// Returns `SettingsError` when the settings file cannot be written
pub fn store_mode(path: &Path, mode: Mode) -> Result<(), SettingsError> {
    let raw = serde_json::to_string_pretty(&Settings { mode })
        .map_err(|e| SettingsError(format!("serialize: {}", e)))?;
    std::fs::write(path, raw).map_err(|e| SettingsError(format!("write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_defaults_to_local() {
        let dir = tempdir().unwrap();
        assert_eq!(load_mode(&dir.path().join("settings.json")), Mode::Local);
    }

    #[test]
    fn test_mode_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        store_mode(&path, Mode::Remote).unwrap();
        assert_eq!(load_mode(&path), Mode::Remote);

        store_mode(&path, Mode::Local).unwrap();
        assert_eq!(load_mode(&path), Mode::Local);
    }

    #[test]
    fn test_corrupt_file_defaults_to_local() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(load_mode(&path), Mode::Local);
    }
}
