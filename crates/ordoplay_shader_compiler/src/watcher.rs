// SPDX-License-Identifier: MIT OR Apache-2.0
//! Debounced watching of a single graph document.
//!
//! The parent directory is watched non-recursively so that editors which save
//! by writing a temporary file and renaming it over the original are still
//! seen. Events for other files in that directory are dropped.

use notify_debouncer_full::{
    new_debouncer,
    notify::{self, EventKind, RecommendedWatcher, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Events reported for the watched document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    /// The document was created or modified
    Changed(PathBuf),
    /// The document was deleted
    Removed(PathBuf),
    /// The watcher reported an error
    Error(String),
}

/// Map a notify event kind to the event reported for it
fn classify(kind: &EventKind, path: PathBuf) -> Option<GraphEvent> {
    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => Some(GraphEvent::Changed(path)),
        EventKind::Remove(_) => Some(GraphEvent::Removed(path)),
        EventKind::Any | EventKind::Access(_) | EventKind::Other => None,
    }
}

fn is_target(file_name: &OsString, path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == file_name.as_os_str())
}

/// Watches one graph document for changes
pub struct GraphWatcher {
    _watcher: Debouncer<RecommendedWatcher, RecommendedCache>,
    event_rx: Receiver<GraphEvent>,
    path: PathBuf,
}

impl GraphWatcher {
    /// Start watching `path` with the given debounce window
    pub fn new(path: &Path, debounce: Duration) -> Result<Self, notify::Error> {
        let (event_tx, event_rx) = mpsc::channel();
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| notify::Error::path_not_found().add_path(path.to_path_buf()))?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    for event in events {
                        let Some(path) = event.paths.iter().find(|p| is_target(&file_name, p)) else {
                            continue;
                        };
                        if let Some(graph_event) = classify(&event.kind, path.clone()) {
                            let _ = event_tx.send(graph_event);
                        }
                    }
                }
                Err(errors) => {
                    for error in errors {
                        let _ = event_tx.send(GraphEvent::Error(error.to_string()));
                    }
                }
            }
        })?;

        watcher.watch(&directory, RecursiveMode::NonRecursive)?;
        tracing::info!("Watching {:?} for changes", path);

        Ok(Self {
            _watcher: watcher,
            event_rx,
            path: path.to_path_buf(),
        })
    }

    /// The watched document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the next event; `None` once the watcher has shut down
    pub fn next_event(&self) -> Option<GraphEvent> {
        match self.event_rx.recv() {
            Ok(event) => Some(event),
            Err(_) => {
                tracing::warn!("Graph watcher channel disconnected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn test_classify() {
        let path = PathBuf::from("graph.ron");
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Any), path.clone()),
            Some(GraphEvent::Changed(path.clone()))
        );
        assert_eq!(
            classify(&EventKind::Create(CreateKind::File), path.clone()),
            Some(GraphEvent::Changed(path.clone()))
        );
        assert_eq!(
            classify(&EventKind::Remove(RemoveKind::File), path.clone()),
            Some(GraphEvent::Removed(path.clone()))
        );
        assert_eq!(classify(&EventKind::Access(AccessKind::Any), path), None);
    }

    #[test]
    fn test_target_filter() {
        let name = OsString::from("graph.ron");
        assert!(is_target(&name, Path::new("/work/materials/graph.ron")));
        assert!(!is_target(&name, Path::new("/work/materials/graph.ron.tmp")));
        assert!(!is_target(&name, Path::new("/work/materials/shaderc.ron")));
    }

    #[test]
    fn test_watch_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("ordoplay_shaderc_missing_dir")
            .join("nested")
            .join("graph.ron");
        assert!(GraphWatcher::new(&path, Duration::from_millis(10)).is_err());
    }
}
