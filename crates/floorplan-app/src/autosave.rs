//! Collects committed plan snapshots and writes the latest one to disk.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use floorplan_core::CommitObserver;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct Snapshot {
    latest: Option<String>,
    commits: usize,
    dirty: bool,
}

/// Receives commit notifications from an editor session.
///
/// Clones share the same snapshot, so one clone can be handed to the
/// session as its observer while another flushes to disk.
#[derive(Debug, Clone, Default)]
pub struct AutoSave {
    inner: Rc<RefCell<Snapshot>>,
}

impl AutoSave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer to register on the session.
    pub fn observer(&self) -> CommitObserver {
        let inner = Rc::clone(&self.inner);
        Box::new(move |json: &str| {
            let mut snapshot = inner.borrow_mut();
            snapshot.latest = Some(json.to_string());
            snapshot.commits += 1;
            snapshot.dirty = true;
        })
    }

    /// Number of commits seen so far.
    pub fn commits(&self) -> usize {
        self.inner.borrow().commits
    }

    /// Check if there are commits not yet flushed.
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty
    }

    /// The most recent committed JSON.
    pub fn latest(&self) -> Option<String> {
        self.inner.borrow().latest.clone()
    }

    /// Write the latest snapshot to `path` if anything changed since the
    /// last flush. Returns whether a file was written.
    pub fn flush(&self, path: &Path) -> AppResult<bool> {
        let mut snapshot = self.inner.borrow_mut();
        if !snapshot.dirty {
            return Ok(false);
        }
        let Some(json) = snapshot.latest.as_deref() else {
            return Ok(false);
        };
        fs::write(path, json).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        snapshot.dirty = false;
        log::info!("Saved plan to {}", path.display());
        Ok(true)
    }
}
