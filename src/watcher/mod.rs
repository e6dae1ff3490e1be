//! Filesystem change watcher feeding the debounce loop.

pub mod debounce;
pub mod state;

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::WatchError;

pub use debounce::{Trigger, run_debounce_loop};
pub use state::{WatchSnapshot, WatcherState};

/// Directory names whose contents never count as a change.
const IGNORED_DIRS: &[&str] = &[".git"];

/// A single changed path reported by the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub is_dir: bool,
    /// The path was created or moved into place.
    pub appeared: bool,
}

impl ChangeEvent {
    /// Split a notify event into per-path change events.
    ///
    /// Access and other non-mutating kinds yield nothing.
    pub fn from_notify(event: &Event) -> Vec<ChangeEvent> {
        let folder_kind = match event.kind {
            EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => true,
            EventKind::Any
            | EventKind::Create(_)
            | EventKind::Modify(_)
            | EventKind::Remove(_) => false,
            EventKind::Access(_) | EventKind::Other => return Vec::new(),
        };
        let appeared = matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(_))
        );

        event
            .paths
            .iter()
            .map(|path| ChangeEvent {
                path: path.clone(),
                is_dir: folder_kind || path.is_dir(),
                appeared,
            })
            .collect()
    }

    /// Whether this event should mark a change as pending.
    pub fn is_relevant(&self) -> bool {
        !self.is_dir && !in_ignored_dir(&self.path)
    }

    /// Whether this is a directory that appeared inside the watched tree.
    pub fn is_new_dir(&self) -> bool {
        self.is_dir && self.appeared && !in_ignored_dir(&self.path)
    }
}

/// Whether `dir` holds at least one file anywhere below it.
///
/// `.git` directories are not descended into. Unreadable entries are skipped.
pub fn contains_file(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| !IGNORED_DIRS.iter().any(|d| entry.file_name() == *d))
        .filter_map(Result::ok)
        .any(|entry| entry.file_type().is_file())
}

fn in_ignored_dir(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => IGNORED_DIRS.iter().any(|dir| name == *dir),
        _ => false,
    })
}

/// Handle to a running watcher. Dropping it stops the subscription.
pub struct WatcherHandle {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl WatcherHandle {
    /// Canonical path being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Start watching `root` recursively, recording relevant events in `state`.
///
/// Fails if `root` does not exist or the platform subscription cannot be
/// established.
pub fn start_watcher(root: &Path, state: Arc<WatcherState>) -> Result<WatcherHandle, WatchError> {
    let root = root.canonicalize().map_err(|source| WatchError::InvalidRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            for change in ChangeEvent::from_notify(&event) {
                if change.is_relevant() {
                    debug!("Change detected: {}", change.path.display());
                    state.record_event();
                } else if change.is_new_dir() {
                    // Files already inside get no events of their own; the
                    // loop rescans once the watch on this directory exists.
                    debug!("New directory: {}", change.path.display());
                    if contains_file(&change.path) {
                        state.record_event();
                    }
                    state.note_new_dir(change.path);
                }
            }
        }
        Err(e) => warn!("Watcher error: {}", e),
    })
    .map_err(|source| WatchError::Subscribe {
        path: root.clone(),
        source,
    })?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|source| WatchError::Subscribe {
            path: root.clone(),
            source,
        })?;

    Ok(WatcherHandle {
        _watcher: watcher,
        root,
    })
}
