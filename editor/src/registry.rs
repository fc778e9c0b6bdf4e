//! Several editors on one page.
//!
//! Each editor instance gets an [`EditorId`]. Keyboard events go only to the
//! focused editor, so two layouts on the same page never both react to one
//! key press. Clock ticks reach every editor.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;
use std::fmt;

use crate::config::{ConfigError, EditorConfig};
use crate::engine::{Action, EngineCore};
use crate::input::{Key, Modifiers};

/// Handle for one registered editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(u32);

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor-{}", self.0)
    }
}

/// Owns every live editor and tracks which one has keyboard focus.
#[derive(Default)]
pub struct EditorRegistry {
    editors: BTreeMap<EditorId, EngineCore>,
    next_id: u32,
    focused: Option<EditorId>,
}

impl EditorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register an editor from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn create(&mut self, config: EditorConfig) -> Result<EditorId, ConfigError> {
        Ok(self.insert(EngineCore::new(config)?))
    }

    /// Register an existing editor.
    pub fn insert(&mut self, core: EngineCore) -> EditorId {
        self.next_id += 1;
        let id = EditorId(self.next_id);
        self.editors.insert(id, core);
        tracing::debug!(%id, "editor registered");
        id
    }

    /// Unregister an editor, dropping focus if it had it.
    pub fn remove(&mut self, id: EditorId) -> Option<EngineCore> {
        let core = self.editors.remove(&id)?;
        if self.focused == Some(id) {
            self.focused = None;
        }
        tracing::debug!(%id, "editor removed");
        Some(core)
    }

    #[must_use]
    pub fn get(&self, id: EditorId) -> Option<&EngineCore> {
        self.editors.get(&id)
    }

    pub fn get_mut(&mut self, id: EditorId) -> Option<&mut EngineCore> {
        self.editors.get_mut(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Registered ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = EditorId> + '_ {
        self.editors.keys().copied()
    }

    // --- Focus ---

    /// Give keyboard focus to `id`. Returns false for an unknown id.
    pub fn focus(&mut self, id: EditorId) -> bool {
        if !self.editors.contains_key(&id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    #[must_use]
    pub fn focused(&self) -> Option<EditorId> {
        self.focused
    }

    // --- Routing ---

    /// Deliver a key press to the focused editor, if any.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Option<(EditorId, Vec<Action>)> {
        let id = self.focused?;
        let core = self.editors.get_mut(&id)?;
        Some((id, core.on_key_down(key, modifiers)))
    }

    /// Advance every editor's clock. Only editors that produced actions are listed.
    pub fn tick(&mut self, now_ms: f64) -> Vec<(EditorId, Vec<Action>)> {
        self.editors
            .iter_mut()
            .map(|(id, core)| (*id, core.tick(now_ms)))
            .filter(|(_, actions)| !actions.is_empty())
            .collect()
    }
}
