// Layout persistence: read/write the workspace layout file.
// The engine only produces and consumes WorkspaceLayout; all I/O lives here.

use std::path::{Path, PathBuf};

use endfield_core::WorkspaceLayout;
use thiserror::Error;

use crate::settings;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("layout file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn layout_path() -> Result<PathBuf, SessionError> {
    settings::config_dir()
        .map(|dir| dir.join("layout.json"))
        .ok_or(SessionError::NoConfigDir)
}

pub fn save_layout(path: &Path, layout: &WorkspaceLayout) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(layout)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// `Ok(None)` when no layout has been saved yet.
pub fn load_layout(path: &Path) -> Result<Option<WorkspaceLayout>, SessionError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use endfield_core::{DockSlot, Tab};
    use endfield_layout::DockLayout;

    #[test]
    fn test_save_then_load_restores_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("layout.json");

        let mut layout = DockLayout::new();
        layout.open_tab(Tab::file("/srv/app/values.yaml"), DockSlot::Center);
        layout.set_area_visible(DockSlot::Bottom, true);
        save_layout(&path, &layout.serialize_layout()).unwrap();

        let loaded = load_layout(&path).unwrap().expect("layout was saved");
        let mut restored = DockLayout::empty();
        restored.restore_layout(&loaded).unwrap();
        assert_eq!(restored.areas(), layout.areas());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_layout(&dir.path().join("layout.json")).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "{\"version\": 1, \"areas\": [").unwrap();
        assert!(matches!(load_layout(&path), Err(SessionError::Json(_))));
    }
}
