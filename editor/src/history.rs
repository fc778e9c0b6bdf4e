//! Undo/redo history over [`SceneState`] snapshots.
//!
//! The stack is linear: taking a snapshot after an undo discards the redo
//! tail. Capacity is bounded; the oldest entry is evicted on overflow.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::scene::SceneState;

/// Bounded snapshot stack with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<SceneState>,
    /// Index of the entry matching the live scene. Meaningless while `entries` is empty.
    index: usize,
    capacity: usize,
}

impl History {
    /// Empty history holding at most `capacity` snapshots (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), index: 0, capacity: capacity.max(1) }
    }

    /// Record `state` as the newest entry.
    pub fn snapshot(&mut self, state: &SceneState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(state.clone());
        self.index = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.index -= 1;
        }
    }

    /// Step back one entry and return the state to restore.
    pub fn undo(&mut self) -> Option<&SceneState> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one entry and return the state to restore.
    pub fn redo(&mut self) -> Option<&SceneState> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.index + 1 < self.entries.len()
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: &SceneState) {
        self.entries.clear();
        self.index = 0;
        self.snapshot(initial);
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position, if any snapshot exists.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.index)
    }
}
