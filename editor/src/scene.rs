//! Scene model: seating objects, the stage marker, and the in-memory store.
//!
//! This module defines what is on the layout canvas (`Seating`, `SeatingKind`,
//! `Stage`), the snapshot unit used by undo/redo and persistence
//! (`SceneState`), the sparse-update type for incremental edits
//! (`SeatingPatch`), and the store that owns all live seatings (`Scene`).
//!
//! Placement rules live in [`crate::geometry`]; the store calls into it so
//! that every seating it holds satisfies the bounds and no-overlap invariants
//! after each mutation. The only exception is [`Scene::insert_trusted`], used
//! when loading a saved layout.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{STAGE_HEIGHT, STAGE_MARGIN, STAGE_WIDTH};
use crate::geometry::{self, Bounds, Rect};

/// Unique identifier for a seating.
pub type SeatingId = Uuid;

/// The kind of a seating object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatingKind {
    /// Multi-person table.
    #[serde(alias = "masa")]
    Table,
    /// Single seat.
    #[serde(alias = "koltuk")]
    Seat,
    /// VIP box.
    #[serde(alias = "vip")]
    VipBox,
}

impl SeatingKind {
    /// Wire name, also used as the primary auto-arrange sort key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Seat => "seat",
            Self::VipBox => "vip-box",
        }
    }

    /// Prefix used when auto-numbering names.
    #[must_use]
    pub fn name_prefix(self) -> &'static str {
        match self {
            Self::Table => "T",
            Self::Seat => "S",
            Self::VipBox => "VIP",
        }
    }

    /// Default `(width, height)`.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Table => (60.0, 40.0),
            Self::Seat => (30.0, 30.0),
            Self::VipBox => (80.0, 60.0),
        }
    }

    #[must_use]
    pub fn default_capacity(self) -> u32 {
        match self {
            Self::Table => 4,
            Self::Seat => 1,
            Self::VipBox => 8,
        }
    }

    /// Default fill. Tables take their color from the capacity palette.
    #[must_use]
    pub fn default_color(self, capacity: u32) -> &'static str {
        match self {
            Self::Table => color_for_capacity(capacity),
            Self::Seat => "#e74c3c",
            Self::VipBox => "#f1c40f",
        }
    }

    #[must_use]
    pub fn default_icon(self) -> &'static str {
        match self {
            Self::Table => "🪑",
            Self::Seat => "💺",
            Self::VipBox => "👑",
        }
    }
}

/// Fill color keyed by occupant count. Unlisted capacities get neutral grey.
#[must_use]
pub fn color_for_capacity(capacity: u32) -> &'static str {
    match capacity {
        1 => "#e74c3c",
        2 => "#3498db",
        4 => "#2ecc71",
        6 => "#f39c12",
        8 => "#9b59b6",
        10 => "#34495e",
        12 => "#1abc9c",
        _ => "#95a5a6",
    }
}

/// A placeable seating unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seating {
    /// Unique identifier for this seating.
    pub id: SeatingId,
    /// Table, seat or VIP box.
    #[serde(rename = "type")]
    pub kind: SeatingKind,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Number of occupants.
    pub capacity: u32,
    /// Display label.
    pub name: String,
    /// CSS fill color.
    pub color: String,
    /// Glyph drawn in the middle of the box.
    pub icon: String,
    /// Owned by the reservation flow; the editor never changes it.
    #[serde(default)]
    pub reserved: bool,
}

impl Seating {
    /// Bounding box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Optional overrides for a new seating. Absent fields use the kind defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatingAttrs {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub capacity: Option<u32>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub reserved: bool,
}

/// Sparse update for a seating. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Which side of the room the stage is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagePosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl StagePosition {
    /// Categorize a stage center against canvas thirds.
    ///
    /// The horizontal test runs first, so the middle column resolves to
    /// `Top` or `Bottom`.
    #[must_use]
    pub fn from_center(cx: f64, cy: f64, canvas_width: f64, canvas_height: f64) -> Self {
        if cx < canvas_width / 3.0 {
            Self::Left
        } else if cx > canvas_width * 2.0 / 3.0 {
            Self::Right
        } else if cy < canvas_height / 3.0 {
            Self::Top
        } else {
            Self::Bottom
        }
    }
}

/// The stage marker. Never participates in collision checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Stage {
    /// Stage docked to the middle of `position`'s side.
    #[must_use]
    pub fn docked(position: StagePosition, canvas_width: f64, canvas_height: f64) -> Self {
        let (x, y) = match position {
            StagePosition::Top => ((canvas_width - STAGE_WIDTH) / 2.0, STAGE_MARGIN),
            StagePosition::Bottom => (
                (canvas_width - STAGE_WIDTH) / 2.0,
                canvas_height - STAGE_HEIGHT - STAGE_MARGIN,
            ),
            StagePosition::Left => (STAGE_MARGIN, (canvas_height - STAGE_HEIGHT) / 2.0),
            StagePosition::Right => (
                canvas_width - STAGE_WIDTH - STAGE_MARGIN,
                (canvas_height - STAGE_HEIGHT) / 2.0,
            ),
        };
        Self { x, y, width: STAGE_WIDTH, height: STAGE_HEIGHT }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Everything that undo/redo restores and persistence saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub seatings: Vec<Seating>,
    pub stage_position: StagePosition,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub grid_size: f64,
}

impl SceneState {
    /// Empty scene with the given geometry.
    #[must_use]
    pub fn empty(canvas_width: f64, canvas_height: f64, grid_size: f64, stage_position: StagePosition) -> Self {
        Self { seatings: Vec::new(), stage_position, canvas_width, canvas_height, grid_size }
    }
}

/// In-memory store of seatings plus the stage marker.
///
/// Seatings are kept in insertion order, which is also draw order.
#[derive(Debug, Clone)]
pub struct Scene {
    state: SceneState,
    stage: Stage,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(canvas_width: f64, canvas_height: f64, grid_size: f64, stage_position: StagePosition) -> Self {
        Self {
            stage: Stage::docked(stage_position, canvas_width, canvas_height),
            state: SceneState::empty(canvas_width, canvas_height, grid_size, stage_position),
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    #[must_use]
    pub fn seatings(&self) -> &[Seating] {
        &self.state.seatings
    }

    #[must_use]
    pub fn get(&self, id: &SeatingId) -> Option<&Seating> {
        self.state.seatings.iter().find(|s| s.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &SeatingId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn stage_position(&self) -> StagePosition {
        self.state.stage_position
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.state.canvas_width,
            height: self.state.canvas_height,
            grid_size: self.state.grid_size,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.seatings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.seatings.is_empty()
    }

    /// Lowest unused auto-numbered name for `kind`, e.g. `T3` when `T1` and `T2` exist.
    #[must_use]
    pub fn next_name(&self, kind: SeatingKind) -> String {
        let prefix = kind.name_prefix();
        (1..=u32::MAX)
            .map(|n| format!("{prefix}{n}"))
            .find(|name| !self.state.seatings.iter().any(|s| s.name == *name))
            .unwrap_or_else(|| prefix.to_owned())
    }

    /// Build a seating with a fresh id from `attrs`, filling gaps from the kind defaults.
    #[must_use]
    pub fn build(&self, kind: SeatingKind, x: f64, y: f64, attrs: &SeatingAttrs) -> Seating {
        let (default_w, default_h) = kind.default_size();
        let capacity = attrs.capacity.unwrap_or_else(|| kind.default_capacity());
        Seating {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width: attrs.width.unwrap_or(default_w),
            height: attrs.height.unwrap_or(default_h),
            capacity,
            name: attrs.name.clone().unwrap_or_else(|| self.next_name(kind)),
            color: attrs
                .color
                .clone()
                .unwrap_or_else(|| kind.default_color(capacity).to_owned()),
            icon: attrs.icon.clone().unwrap_or_else(|| kind.default_icon().to_owned()),
            reserved: attrs.reserved,
        }
    }

    // --- Mutations ---

    /// Place a new seating near `(x, y)`.
    ///
    /// The position is clamped, snapped to the grid, and moved one grid step
    /// if it collides. Returns `None` (and adds nothing) when the size or
    /// capacity is not positive, the seating cannot fit on the canvas, or no
    /// free spot is found.
    pub fn add_object(&mut self, kind: SeatingKind, x: f64, y: f64, attrs: &SeatingAttrs) -> Option<SeatingId> {
        let bounds = self.bounds();
        let mut seating = self.build(kind, x, y, attrs);
        if !is_well_formed(&seating) {
            tracing::warn!(
                kind = kind.as_str(),
                width = seating.width,
                height = seating.height,
                capacity = seating.capacity,
                "rejected malformed seating"
            );
            return None;
        }
        if seating.width > bounds.width || seating.height > bounds.height {
            tracing::warn!(kind = kind.as_str(), width = seating.width, height = seating.height, "seating larger than canvas");
            return None;
        }
        let (cx, cy) = geometry::clamp_position(x, y, seating.width, seating.height, bounds);
        let (sx, sy) = geometry::snap_position(cx, cy, seating.width, seating.height, bounds);
        seating.x = sx;
        seating.y = sy;

        let Some((rx, ry)) = geometry::resolve_collision(&seating.rect(), seating.id, &self.state.seatings, bounds)
        else {
            tracing::warn!(kind = kind.as_str(), x = sx, y = sy, "no collision-free position for new seating");
            return None;
        };
        seating.x = rx;
        seating.y = ry;
        let id = seating.id;
        self.state.seatings.push(seating);
        Some(id)
    }

    /// Insert `seating` exactly where it is, if that spot is inside the canvas and free.
    pub fn try_insert(&mut self, seating: Seating) -> Option<SeatingId> {
        let rect = seating.rect();
        if !self.bounds().contains(&rect) || geometry::has_collision(&rect, seating.id, &self.state.seatings) {
            return None;
        }
        let id = seating.id;
        self.state.seatings.push(seating);
        Some(id)
    }

    /// Insert without collision checks or grid snap; only clamps into the canvas.
    ///
    /// Saved layouts are trusted to be valid already.
    pub fn insert_trusted(&mut self, mut seating: Seating) -> SeatingId {
        let (x, y) = geometry::clamp_position(seating.x, seating.y, seating.width, seating.height, self.bounds());
        seating.x = x;
        seating.y = y;
        let id = seating.id;
        self.state.seatings.push(seating);
        id
    }

    /// Remove a seating by id, returning it if it was present.
    pub fn remove_object(&mut self, id: &SeatingId) -> Option<Seating> {
        let idx = self.state.seatings.iter().position(|s| s.id == *id)?;
        Some(self.state.seatings.remove(idx))
    }

    /// Drop every seating.
    pub fn clear(&mut self) {
        self.state.seatings.clear();
    }

    /// Apply a sparse update. Returns false if the seating doesn't exist.
    ///
    /// Position and size are taken as given; callers validate geometry first.
    pub fn update_object(&mut self, id: &SeatingId, patch: &SeatingPatch) -> bool {
        let Some(seating) = self.get_mut(id) else {
            return false;
        };
        if let Some(x) = patch.x {
            seating.x = x;
        }
        if let Some(y) = patch.y {
            seating.y = y;
        }
        if let Some(w) = patch.width {
            seating.width = w;
        }
        if let Some(h) = patch.height {
            seating.height = h;
        }
        if let Some(c) = patch.capacity {
            seating.capacity = c;
        }
        if let Some(ref name) = patch.name {
            seating.name.clone_from(name);
        }
        if let Some(ref color) = patch.color {
            seating.color.clone_from(color);
        }
        if let Some(ref icon) = patch.icon {
            seating.icon.clone_from(icon);
        }
        true
    }

    /// Move a seating. Returns false if it doesn't exist.
    pub fn set_position(&mut self, id: &SeatingId, x: f64, y: f64) -> bool {
        self.update_object(id, &SeatingPatch { x: Some(x), y: Some(y), ..Default::default() })
    }

    /// Change canvas size and grid; seatings are pulled back inside the new bounds.
    pub fn set_canvas_geometry(&mut self, width: f64, height: f64, grid_size: f64) {
        self.state.canvas_width = width;
        self.state.canvas_height = height;
        self.state.grid_size = grid_size;
        let bounds = self.bounds();
        for s in &mut self.state.seatings {
            let (x, y) = geometry::clamp_position(s.x, s.y, s.width, s.height, bounds);
            s.x = x;
            s.y = y;
        }
        self.stage = Stage::docked(self.state.stage_position, width, height);
    }

    /// Change the grid pitch only.
    pub fn set_grid_size(&mut self, grid_size: f64) {
        self.state.grid_size = grid_size;
    }

    /// Set the stage category and dock the marker to that side.
    pub fn set_stage_position(&mut self, position: StagePosition) {
        self.state.stage_position = position;
        self.stage = Stage::docked(position, self.state.canvas_width, self.state.canvas_height);
    }

    /// Drag the stage marker to `(x, y)` (clamped) and recompute its category.
    pub fn move_stage(&mut self, x: f64, y: f64) -> StagePosition {
        let (cx, cy) = geometry::clamp_position(x, y, self.stage.width, self.stage.height, self.bounds());
        self.stage.x = cx;
        self.stage.y = cy;
        let rect = self.stage.rect();
        self.state.stage_position = StagePosition::from_center(
            rect.center_x(),
            rect.center_y(),
            self.state.canvas_width,
            self.state.canvas_height,
        );
        self.state.stage_position
    }

    /// Replace the whole scene with `state` (undo/redo restore). The stage re-docks.
    pub fn replace_state(&mut self, state: SceneState) {
        self.stage = Stage::docked(state.stage_position, state.canvas_width, state.canvas_height);
        self.state = state;
    }

    fn get_mut(&mut self, id: &SeatingId) -> Option<&mut Seating> {
        self.state.seatings.iter_mut().find(|s| s.id == *id)
    }
}

/// Positive finite size and a capacity of at least one.
fn is_well_formed(seating: &Seating) -> bool {
    seating.width.is_finite()
        && seating.width > 0.0
        && seating.height.is_finite()
        && seating.height > 0.0
        && seating.capacity > 0
}
