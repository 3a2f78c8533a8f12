// Debounced background layout saver.
// The engine never does I/O. The shell watches the engine's revision counter
// and hands snapshots to this saver, which coalesces bursts and writes the
// latest one. Failures are logged and dropped; the in-memory layout stays
// authoritative.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use endfield_core::{LayoutEngine, WorkspaceLayout};

use crate::session;

pub struct LayoutSaver {
    tx: Option<Sender<WorkspaceLayout>>,
    handle: Option<JoinHandle<()>>,
    last_revision: Option<u64>,
}

impl LayoutSaver {
    pub fn spawn(path: PathBuf, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<WorkspaceLayout>();
        let spawned = std::thread::Builder::new()
            .name("layout-saver".into())
            .spawn(move || {
                while let Ok(mut pending) = rx.recv() {
                    loop {
                        match rx.recv_timeout(debounce) {
                            Ok(newer) => pending = newer,
                            Err(RecvTimeoutError::Timeout) => break,
                            Err(RecvTimeoutError::Disconnected) => {
                                write(&path, &pending);
                                return;
                            }
                        }
                    }
                    write(&path, &pending);
                }
            });

        match spawned {
            Ok(handle) => Self {
                tx: Some(tx),
                handle: Some(handle),
                last_revision: None,
            },
            Err(e) => {
                log::error!("Failed to start layout saver, layout will not be persisted: {}", e);
                Self {
                    tx: None,
                    handle: None,
                    last_revision: None,
                }
            }
        }
    }

    /// Queue a snapshot for saving. Never blocks on I/O.
    pub fn submit(&self, layout: WorkspaceLayout) {
        if let Some(tx) = &self.tx {
            if tx.send(layout).is_err() {
                log::warn!("Layout saver has stopped; snapshot dropped");
            }
        }
    }

    /// Submit a snapshot if the engine changed since the last call.
    /// The first call only records the current revision.
    pub fn observe(&mut self, engine: &dyn LayoutEngine) {
        let revision = engine.revision();
        match self.last_revision {
            Some(last) if last == revision => {}
            Some(_) => {
                self.last_revision = Some(revision);
                self.submit(engine.serialize_layout());
            }
            None => self.last_revision = Some(revision),
        }
    }

    /// Flush the pending snapshot, if any, and stop the thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Layout saver thread panicked");
            }
        }
    }
}

impl Drop for LayoutSaver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn write(path: &std::path::Path, layout: &WorkspaceLayout) {
    match session::save_layout(path, layout) {
        Ok(()) => log::debug!("Saved layout to {}", path.display()),
        Err(e) => log::error!("Failed to save layout to {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endfield_core::{DockSlot, Tab};
    use endfield_layout::DockLayout;

    #[test]
    fn test_saver_writes_latest_snapshot_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let mut layout = DockLayout::new();
        let mut saver = LayoutSaver::spawn(path.clone(), Duration::from_secs(60));
        saver.observe(&layout);

        for i in 0..5 {
            layout.open_tab(Tab::new(format!("t{i}"), "T", "file"), DockSlot::Center);
            saver.observe(&layout);
        }
        saver.shutdown();

        let saved = session::load_layout(&path).unwrap().expect("layout was flushed");
        assert_eq!(saved, layout.serialize_layout());
    }

    #[test]
    fn test_observe_skips_unchanged_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let layout = DockLayout::new();
        let mut saver = LayoutSaver::spawn(path.clone(), Duration::from_millis(10));
        saver.observe(&layout);
        saver.observe(&layout);
        saver.shutdown();

        assert!(!path.exists());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let saver = LayoutSaver::spawn(blocker.join("layout.json"), Duration::from_millis(10));
        saver.submit(DockLayout::new().serialize_layout());
        saver.shutdown();
    }
}
