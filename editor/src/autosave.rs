//! Debounced auto-save trigger.
//!
//! The editor has no timers of its own. The host feeds the clock through
//! [`crate::engine::EngineCore::tick`]; once the scene has been quiet for the
//! debounce interval after an unsaved change, the tick emits an auto-save
//! action carrying the current configuration.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

/// Tracks unsaved changes and when the last one happened.
#[derive(Debug, Clone)]
pub struct AutoSave {
    debounce_ms: f64,
    /// Clock time of the most recent unsaved change.
    last_change_ms: Option<f64>,
}

impl AutoSave {
    #[must_use]
    pub fn new(debounce_ms: f64) -> Self {
        Self { debounce_ms, last_change_ms: None }
    }

    /// Record a change at `now_ms`, restarting the quiet period.
    pub fn mark_dirty(&mut self, now_ms: f64) {
        self.last_change_ms = Some(now_ms);
    }

    /// Forget pending changes (the host saved explicitly).
    pub fn mark_saved(&mut self) {
        self.last_change_ms = None;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.last_change_ms.is_some()
    }

    /// Whether a save is due at `now_ms`. Returns true at most once per batch of changes.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.last_change_ms {
            Some(changed) if now_ms - changed >= self.debounce_ms => {
                self.last_change_ms = None;
                true
            }
            _ => false,
        }
    }
}
