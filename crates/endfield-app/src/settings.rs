// Settings persistence: global app configuration stored separately from the layout.
// Uses platform-native config dir: e.g. ~/Library/Application Support/endfield/settings.json
// on macOS, ~/.config/endfield/settings.json on Linux.

use std::path::{Path, PathBuf};

use endfield_core::DockSlot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndfieldSettings {
    /// Area that receives tabs opened without an explicit slot (files, diffs).
    #[serde(default = "default_slot")]
    pub default_slot: DockSlot,
    /// Layout changes arriving within this window are written once.
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
}

fn default_slot() -> DockSlot {
    DockSlot::Center
}

fn default_save_debounce_ms() -> u64 {
    500
}

impl Default for EndfieldSettings {
    fn default() -> Self {
        Self {
            default_slot: default_slot(),
            save_debounce_ms: default_save_debounce_ms(),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("endfield"))
}

pub fn load_settings() -> EndfieldSettings {
    match config_dir() {
        Some(dir) => load_settings_from(&dir.join("settings.json")),
        None => EndfieldSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> EndfieldSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                EndfieldSettings::default()
            }
        },
        Err(_) => EndfieldSettings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("settings.json"));
        assert_eq!(settings, EndfieldSettings::default());
        assert_eq!(settings.default_slot, DockSlot::Center);
        assert_eq!(settings.save_debounce_ms, 500);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_slot": "right"}"#).unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.default_slot, DockSlot::Right);
        assert_eq!(settings.save_debounce_ms, 500);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), EndfieldSettings::default());
    }
}
