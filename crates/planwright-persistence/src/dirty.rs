//! Dirty tracking by edit generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Compares the newest edit generation against the newest persisted one.
///
/// Shared between the editor and the autosave task; a save only ever moves
/// the saved generation forward, so a slow autosave finishing after a
/// newer manual save cannot make the design look dirty again.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    edited: AtomicU64,
    saved: AtomicU64,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the state at `generation` exists.
    pub fn mark_edited(&self, generation: u64) {
        self.edited.fetch_max(generation, Ordering::SeqCst);
    }

    /// Records that the state at `generation` has been persisted.
    pub fn mark_saved(&self, generation: u64) {
        self.saved.fetch_max(generation, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.edited() > self.saved()
    }

    pub fn edited(&self) -> u64 {
        self.edited.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> u64 {
        self.saved.load(Ordering::SeqCst)
    }
}
