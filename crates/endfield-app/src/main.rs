// Endfield workspace shell
// Owns the dock layout for the session: restores it from disk, applies
// commands, and persists changes through the debounced saver.

mod command;
mod saver;
mod session;
mod settings;

use std::path::Path;
use std::time::Duration;

use endfield_layout::DockLayout;

use command::Command;
use saver::LayoutSaver;

// ──────────────────────────────────────────────
// Startup
// ──────────────────────────────────────────────

/// Restore the persisted layout, falling back to the default arrangement
/// when there is none or it cannot be used.
fn restore_or_default() -> DockLayout {
    match session::layout_path() {
        Ok(path) => restore_from(&path),
        Err(e) => {
            log::warn!("{}", e);
            DockLayout::new()
        }
    }
}

fn restore_from(path: &Path) -> DockLayout {
    let mut layout = DockLayout::new();
    match session::load_layout(path) {
        Ok(Some(saved)) => {
            if let Err(e) = layout.restore_layout(&saved) {
                log::info!("Saved layout at {} not restored ({}), using default", path.display(), e);
            }
        }
        Ok(None) => log::info!("No saved layout at {}, using default", path.display()),
        Err(e) => log::warn!("Ignoring saved layout: {}", e),
    }
    layout
}

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn main() {
    env_logger::init();

    let settings = settings::load_settings();
    let mut layout = restore_or_default();

    let mut saver = match session::layout_path() {
        Ok(path) => Some(LayoutSaver::spawn(path, Duration::from_millis(settings.save_debounce_ms))),
        Err(e) => {
            log::warn!("Layout will not be persisted: {}", e);
            None
        }
    };
    if let Some(saver) = saver.as_mut() {
        saver.observe(&layout);
    }

    for arg in std::env::args().skip(1) {
        match Command::parse(&arg) {
            Some(cmd) => {
                log::debug!("applying {:?}", cmd);
                cmd.apply(&mut layout, settings.default_slot);
                if let Some(saver) = saver.as_mut() {
                    saver.observe(&layout);
                }
            }
            None => log::warn!("Unknown command: {}", arg),
        }
    }

    if let Some(saver) = saver {
        saver.shutdown();
    }

    match serde_json::to_string_pretty(&layout.serialize_layout()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize layout: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endfield_core::{DockSlot, Tab};

    #[test]
    fn test_restore_from_saved_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut saved = DockLayout::new();
        saved.open_tab(Tab::file("/srv/app/values.yaml"), DockSlot::Center);
        session::save_layout(&path, &saved.serialize_layout()).unwrap();

        assert_eq!(restore_from(&path).areas(), saved.areas());
    }

    #[test]
    fn test_rejected_layout_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut future = DockLayout::empty().serialize_layout();
        future.version = 2;
        session::save_layout(&path, &future).unwrap();

        assert_eq!(restore_from(&path).areas(), DockLayout::new().areas());
    }

    #[test]
    fn test_missing_layout_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let layout = restore_from(&dir.path().join("layout.json"));
        assert_eq!(layout.areas(), DockLayout::new().areas());
    }
}
