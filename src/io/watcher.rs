// Catalog file watching
use crate::catalog::load_catalog;
use crate::message::Message;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// Changes closer together than this are folded into one reload
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Keeps the underlying watcher alive while reloads are consumed
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<()>,
    path: PathBuf,
}

impl CatalogWatcher {
    pub fn new(path: &Path) -> Result<Self, notify::Error> {
        // rename-over saves replace the file, so watch its directory
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let target = path.to_path_buf();
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) if is_relevant(&event.kind) && touches(&event, &target) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => log::warn!("Catalog watcher error: {}", e),
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        log::info!("Watching {}", path.display());

        Ok(Self {
            _watcher: watcher,
            events: rx,
            path: path.to_path_buf(),
        })
    }

    /// Block until the catalog changes, then reload it.
    ///
    /// Returns `None` once the watcher has shut down.
    pub fn next_reload(&self) -> Option<Message> {
        self.events.recv().ok()?;
        loop {
            match self.events.recv_timeout(DEBOUNCE) {
                Ok(()) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
        Some(reload_message(&self.path))
    }
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Whether `event` concerns the catalog file rather than a sibling in its directory
fn touches(event: &Event, target: &Path) -> bool {
    let Some(name) = target.file_name() else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}

/// Reload the catalog into a `CatalogReloaded` message
pub fn reload_message(path: &Path) -> Message {
    let result = load_catalog(path)
        .map(Arc::new)
        .map_err(|e| e.to_string());
    if let Err(e) = &result {
        log::error!("Catalog reload failed: {}", e);
    }
    Message::CatalogReloaded(result)
}
