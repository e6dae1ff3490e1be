//! Shared pending/last-event state between the watcher callback and the loop.

use std::path::PathBuf;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::contains_file;

/// Consistent copy of the watcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchSnapshot {
    pub pending: bool,
    pub last_event: Option<Instant>,
}

/// Pending flag and last event time, updated as one unit.
///
/// The notify callback thread writes through [`record_event`](Self::record_event);
/// the debounce loop reads with [`is_quiet`](Self::is_quiet) and resets with
/// [`clear`](Self::clear).
///
/// Directories that appear inside the tree are queued with
/// [`note_new_dir`](Self::note_new_dir): files written into them before the
/// platform watch covers them produce no events of their own, so the loop
/// rescans them with [`recheck_new_dirs`](Self::recheck_new_dirs).
#[derive(Debug, Default)]
pub struct WatcherState {
    inner: Mutex<WatchSnapshot>,
    new_dirs: Mutex<Vec<PathBuf>>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a change as pending at the current time.
    pub fn record_event(&self) {
        self.record_event_at(Instant::now());
    }

    pub fn record_event_at(&self, at: Instant) {
        let mut inner = self.inner.lock();
        inner.pending = true;
        inner.last_event = Some(at);
    }

    pub fn snapshot(&self) -> WatchSnapshot {
        *self.inner.lock()
    }

    /// True when a change is pending and nothing arrived for `quiet_period`.
    pub fn is_quiet(&self, now: Instant, quiet_period: Duration) -> bool {
        let inner = self.inner.lock();
        match (inner.pending, inner.last_event) {
            (true, Some(last)) => now.saturating_duration_since(last) >= quiet_period,
            _ => false,
        }
    }

    /// Reset the pending flag after a pipeline run.
    pub fn clear(&self) {
        self.inner.lock().pending = false;
    }

    /// Queue a newly appeared directory for a later rescan.
    pub fn note_new_dir(&self, dir: PathBuf) {
        self.new_dirs.lock().push(dir);
    }

    /// Rescan queued directories, recording an event if any holds a file.
    ///
    /// Returns true when an event was recorded. The queue is emptied.
    pub fn recheck_new_dirs(&self) -> bool {
        let dirs = std::mem::take(&mut *self.new_dirs.lock());
        if dirs.is_empty() {
            return false;
        }

        let found = dirs.iter().any(|dir| contains_file(dir));
        if found {
            debug!("Files found in {} new directories", dirs.len());
            self.record_event();
        }
        found
    }
}
