//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the interaction controller.
//! `Modifiers` captures the user's intent at the time of a pointer or key
//! event. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying all context needed to compute
//! per-tick positions and to commit or revert on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::geometry::{GuideLine, Rect};
use crate::hit::ResizeAnchor;
use crate::scene::{SeatingId, StagePosition};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Shift-click toggles membership; Shift-drag on empty canvas lassos.
    #[must_use]
    pub fn extends_selection(self) -> bool {
        self.shift
    }

    /// Shift turns 1 px arrow nudges into grid-size steps.
    #[must_use]
    pub fn grid_step(self) -> bool {
        self.shift
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"ArrowUp"`, `"c"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key name, lowercased when it is a single character so `"Z"` and `"z"` match.
    #[must_use]
    pub fn normalized(&self) -> String {
        if self.0.chars().count() == 1 {
            self.0.to_lowercase()
        } else {
            self.0.clone()
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// One active touch contact, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Browser touch identifier.
    pub id: i32,
    pub point: Point,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Selected seatings in selection order, without duplicates.
    pub selection: Vec<SeatingId>,
    /// In-progress lasso rectangle in canvas coordinates.
    pub marquee: Option<Rect>,
    /// Alignment guides from the current drag tick.
    pub guides: Vec<GuideLine>,
    /// Clock time (ms) until which the collision indicator is shown.
    pub collision_until_ms: Option<f64>,
}

impl UiState {
    #[must_use]
    pub fn is_selected(&self, id: &SeatingId) -> bool {
        self.selection.contains(id)
    }

    /// The single selected seating, if exactly one is selected.
    #[must_use]
    pub fn single_selection(&self) -> Option<SeatingId> {
        match self.selection.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: SeatingId) {
        if let Some(pos) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(id);
        }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute positions
/// and emit the final commit on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the view with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Two-finger pinch: zoom about the midpoint and pan with it.
    Pinching {
        /// Finger distance at the start of the pinch.
        start_distance: f64,
        /// Camera zoom at the start of the pinch.
        start_zoom: f64,
        /// Screen-space midpoint at the previous event.
        last_mid: Point,
    },
    /// The user is moving the selected seatings.
    DraggingSelection {
        /// Seating that was grabbed; grid and alignment snap follow it.
        primary: SeatingId,
        /// Canvas-space pointer position at pointer-down.
        start_world: Point,
        /// Position of each dragged seating at pointer-down.
        origins: Vec<(SeatingId, f64, f64)>,
    },
    /// The user is resizing a seating by dragging one of its eight handles.
    ResizingSeating {
        /// Id of the seating being resized.
        id: SeatingId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Canvas-space pointer position at the start of the resize.
        start_world: Point,
        /// Geometry at the start of the resize, restored if the result overlaps.
        orig: Rect,
    },
    /// Shift-drag over empty canvas.
    LassoSelecting {
        /// Canvas-space corner where the drag started.
        anchor_world: Point,
    },
    /// The user is dragging the stage marker.
    DraggingStage {
        /// Pointer offset from the stage's top-left corner.
        grab_dx: f64,
        grab_dy: f64,
        /// Stage category at the start, to decide whether to commit.
        orig_position: StagePosition,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
