//! Shared numeric constants for the editor crate.

// ── Canvas defaults ─────────────────────────────────────────────

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Default grid pitch in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default quiet period before an auto-save fires, in milliseconds.
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: f64 = 2000.0;

// ── Geometry ────────────────────────────────────────────────────

/// Minimum seating width/height enforced while resizing.
pub const MIN_SEATING_SIZE: f64 = 20.0;

/// Distance in pixels within which alignment snapping engages.
pub const SNAP_TOLERANCE_PX: f64 = 10.0;

/// Auto-arrange column pitch.
pub const ARRANGE_PITCH_X: f64 = 100.0;

/// Auto-arrange row pitch.
pub const ARRANGE_PITCH_Y: f64 = 80.0;

/// Auto-arrange origin; the top band is left free for the stage.
pub const ARRANGE_ORIGIN_X: f64 = 50.0;
pub const ARRANGE_ORIGIN_Y: f64 = 80.0;

// ── Stage ───────────────────────────────────────────────────────

pub const STAGE_WIDTH: f64 = 100.0;
pub const STAGE_HEIGHT: f64 = 40.0;

/// Gap between the stage and the canvas edge it is docked to.
pub const STAGE_MARGIN: f64 = 10.0;

// ── Interaction ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// How long the collision indicator stays visible after a rejected move.
pub const COLLISION_FLASH_MS: f64 = 200.0;

/// Duplicate/paste offset in grid steps.
pub const DUPLICATE_OFFSET_STEPS: f64 = 2.0;

// ── Camera ──────────────────────────────────────────────────────

pub const ZOOM_STEP: f64 = 1.2;
pub const ZOOM_MIN: f64 = 0.3;
pub const ZOOM_MAX: f64 = 3.0;

/// Wheel delta (pixels) that corresponds to one zoom step.
pub const WHEEL_ZOOM_PIXELS: f64 = 100.0;
