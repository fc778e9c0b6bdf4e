//! Geometry engine: collision tests, snapping, arrangement and alignment.
//!
//! Everything here is a pure function over seating geometry. Callers in
//! [`crate::scene`] and [`crate::engine`] decide whether to apply the computed
//! positions; nothing in this module mutates the scene.
//!
//! Boxes are axis-aligned and anchored at their top-left corner. Two boxes are
//! considered separated when one ends at or before the other begins, so
//! seatings may sit edge-to-edge with zero gap.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::cmp::Ordering;

use crate::consts::{ARRANGE_ORIGIN_X, ARRANGE_ORIGIN_Y, ARRANGE_PITCH_X, ARRANGE_PITCH_Y};
use crate::scene::{Seating, SeatingId};

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self::new(ax.min(bx), ay.min(by), (ax - bx).abs(), (ay - by).abs())
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Same size, moved to `(x, y)`.
    #[must_use]
    pub fn at(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Whether the two boxes overlap. Touching edges do not count.
    #[must_use]
    pub fn collides(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Whether `(px, py)` lies inside or on the border of the box.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Canvas extent and grid pitch that every placement is validated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub grid_size: f64,
}

impl Bounds {
    /// Whether `rect` lies fully inside the canvas.
    #[must_use]
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= self.width && rect.bottom() <= self.height
    }
}

/// Orientation of an alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Constant x, spanning `start..end` in y.
    Vertical,
    /// Constant y, spanning `start..end` in x.
    Horizontal,
}

/// A guide drawn while an alignment snap is engaged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub orientation: Orientation,
    pub coordinate: f64,
    pub start: f64,
    pub end: f64,
}

/// Result of [`alignment_snap`]: adjusted position plus the guides to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentSnap {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub guides: Vec<GuideLine>,
}

/// Bulk alignment modes for a multi-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    /// Average horizontal center.
    Center,
    /// Average vertical center.
    Middle,
}

/// Distribution axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

// =============================================================
// Collision
// =============================================================

/// All seatings other than `id` whose boxes overlap `rect`.
#[must_use]
pub fn collisions<'a>(rect: &Rect, id: SeatingId, seatings: &'a [Seating]) -> Vec<&'a Seating> {
    seatings
        .iter()
        .filter(|other| other.id != id && rect.collides(&other.rect()))
        .collect()
}

/// Whether `rect` (belonging to `id`) overlaps any other seating.
#[must_use]
pub fn has_collision(rect: &Rect, id: SeatingId, seatings: &[Seating]) -> bool {
    seatings
        .iter()
        .any(|other| other.id != id && rect.collides(&other.rect()))
}

/// Probe order for collision resolution: N, S, W, E, then the diagonals.
const RESOLVE_DIRECTIONS: [(f64, f64); 8] = [
    (0.0, -1.0),
    (0.0, 1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, -1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (1.0, 1.0),
];

/// Find a collision-free position one grid step away from `rect`.
///
/// Returns `None` when every probe either leaves the canvas or still collides.
/// A `rect` that is already free is returned unchanged.
#[must_use]
pub fn resolve_collision(rect: &Rect, id: SeatingId, seatings: &[Seating], bounds: Bounds) -> Option<(f64, f64)> {
    if !has_collision(rect, id, seatings) {
        return Some((rect.x, rect.y));
    }
    RESOLVE_DIRECTIONS.iter().find_map(|(dx, dy)| {
        let probe = rect.at(rect.x + dx * bounds.grid_size, rect.y + dy * bounds.grid_size);
        (bounds.contains(&probe) && !has_collision(&probe, id, seatings)).then_some((probe.x, probe.y))
    })
}

// =============================================================
// Snapping and clamping
// =============================================================

/// Round `value` to the nearest multiple of `grid`. A non-positive grid disables snapping.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// Clamp a `width × height` box at `(x, y)` so it stays inside the canvas.
#[must_use]
pub fn clamp_position(x: f64, y: f64, width: f64, height: f64, bounds: Bounds) -> (f64, f64) {
    (
        x.clamp(0.0, (bounds.width - width).max(0.0)),
        y.clamp(0.0, (bounds.height - height).max(0.0)),
    )
}

/// Snap to the grid, then clamp. Clamping last keeps a snap from escaping the canvas.
#[must_use]
pub fn snap_position(x: f64, y: f64, width: f64, height: f64, bounds: Bounds) -> (f64, f64) {
    clamp_position(
        snap_to_grid(x, bounds.grid_size),
        snap_to_grid(y, bounds.grid_size),
        width,
        height,
        bounds,
    )
}

/// Edge/center alignment snap of `moving` against every other seating.
///
/// X candidates (left, right, horizontal center) and Y candidates (top,
/// bottom, vertical center) are evaluated independently; on each axis the
/// closest candidate within `tolerance` wins.
#[must_use]
pub fn alignment_snap(moving: &Rect, id: SeatingId, seatings: &[Seating], tolerance: f64) -> AlignmentSnap {
    // (distance, new position, guide)
    let mut best_x: Option<(f64, f64, GuideLine)> = None;
    let mut best_y: Option<(f64, f64, GuideLine)> = None;

    for other in seatings.iter().filter(|s| s.id != id) {
        let target = other.rect();

        let x_candidates = [
            (moving.x, target.x, target.x),
            (moving.right(), target.right(), target.right() - moving.width),
            (moving.center_x(), target.center_x(), target.center_x() - moving.width / 2.0),
        ];
        for (edge, line, snapped) in x_candidates {
            let dist = (edge - line).abs();
            if dist <= tolerance && best_x.as_ref().is_none_or(|(d, _, _)| dist < *d) {
                let guide = GuideLine {
                    orientation: Orientation::Vertical,
                    coordinate: line,
                    start: moving.y.min(target.y),
                    end: moving.bottom().max(target.bottom()),
                };
                best_x = Some((dist, snapped, guide));
            }
        }

        let y_candidates = [
            (moving.y, target.y, target.y),
            (moving.bottom(), target.bottom(), target.bottom() - moving.height),
            (moving.center_y(), target.center_y(), target.center_y() - moving.height / 2.0),
        ];
        for (edge, line, snapped) in y_candidates {
            let dist = (edge - line).abs();
            if dist <= tolerance && best_y.as_ref().is_none_or(|(d, _, _)| dist < *d) {
                let guide = GuideLine {
                    orientation: Orientation::Horizontal,
                    coordinate: line,
                    start: moving.x.min(target.x),
                    end: moving.right().max(target.right()),
                };
                best_y = Some((dist, snapped, guide));
            }
        }
    }

    let mut snap = AlignmentSnap::default();
    if let Some((_, x, guide)) = best_x {
        snap.x = Some(x);
        snap.guides.push(guide);
    }
    if let Some((_, y, guide)) = best_y {
        snap.y = Some(y);
        snap.guides.push(guide);
    }
    snap
}

// =============================================================
// Arrangement
// =============================================================

/// Lay seatings out on a fixed grid ordered by `(kind, name)`.
///
/// Returns the moves that were accepted, in placement order. A seating whose
/// cell is outside the canvas or would collide with the layout as it stands
/// at that point keeps its current position.
#[must_use]
pub fn auto_arrange(seatings: &[Seating], bounds: Bounds) -> Vec<(SeatingId, f64, f64)> {
    let mut order: Vec<usize> = (0..seatings.len()).collect();
    order.sort_by(|&a, &b| {
        let (sa, sb) = (&seatings[a], &seatings[b]);
        sa.kind
            .as_str()
            .cmp(sb.kind.as_str())
            .then_with(|| sa.name.cmp(&sb.name))
    });

    // Truncation is intended: partial columns are not used.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cols = ((bounds.width / ARRANGE_PITCH_X).floor() as usize).max(1);

    let mut working = seatings.to_vec();
    let mut moves = Vec::new();
    for (slot, &idx) in order.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let (col, row) = ((slot % cols) as f64, (slot / cols) as f64);
        let cell = working[idx].rect().at(
            ARRANGE_ORIGIN_X + col * ARRANGE_PITCH_X,
            ARRANGE_ORIGIN_Y + row * ARRANGE_PITCH_Y,
        );
        let id = working[idx].id;
        if bounds.contains(&cell) && !has_collision(&cell, id, &working) {
            working[idx].x = cell.x;
            working[idx].y = cell.y;
            moves.push((id, cell.x, cell.y));
        }
    }
    moves
}

/// New positions that align every rect according to `alignment`.
///
/// Output order matches input order. An empty input yields an empty output.
#[must_use]
pub fn align(rects: &[Rect], alignment: Alignment) -> Vec<(f64, f64)> {
    if rects.is_empty() {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = rects.len() as f64;
    let min_x = rects.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let max_right = rects.iter().map(Rect::right).fold(f64::NEG_INFINITY, f64::max);
    let min_y = rects.iter().map(|r| r.y).fold(f64::INFINITY, f64::min);
    let max_bottom = rects.iter().map(Rect::bottom).fold(f64::NEG_INFINITY, f64::max);
    let avg_cx = rects.iter().map(Rect::center_x).sum::<f64>() / n;
    let avg_cy = rects.iter().map(Rect::center_y).sum::<f64>() / n;

    rects
        .iter()
        .map(|r| match alignment {
            Alignment::Left => (min_x, r.y),
            Alignment::Right => (max_right - r.width, r.y),
            Alignment::Top => (r.x, min_y),
            Alignment::Bottom => (r.x, max_bottom - r.height),
            Alignment::Center => (avg_cx - r.width / 2.0, r.y),
            Alignment::Middle => (r.x, avg_cy - r.height / 2.0),
        })
        .collect()
}

/// Evenly spread rects along `axis` between the first and last one.
///
/// Interpolates leading edges only, so differently sized rects can end up
/// overlapping. Returns `None` for fewer than three rects. Output order
/// matches input order.
#[must_use]
pub fn distribute(rects: &[Rect], axis: Axis) -> Option<Vec<(f64, f64)>> {
    if rects.len() < 3 {
        return None;
    }
    let lead = |r: &Rect| match axis {
        Axis::Horizontal => r.x,
        Axis::Vertical => r.y,
    };
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| lead(&rects[a]).partial_cmp(&lead(&rects[b])).unwrap_or(Ordering::Equal));

    let first = lead(&rects[order[0]]);
    let last = lead(&rects[order[order.len() - 1]]);
    #[allow(clippy::cast_precision_loss)]
    let span = (order.len() - 1) as f64;

    let mut out: Vec<(f64, f64)> = rects.iter().map(|r| (r.x, r.y)).collect();
    for (rank, &idx) in order.iter().enumerate().skip(1).take(order.len() - 2) {
        #[allow(clippy::cast_precision_loss)]
        let pos = first + (last - first) * (rank as f64) / span;
        match axis {
            Axis::Horizontal => out[idx].0 = pos,
            Axis::Vertical => out[idx].1 = pos,
        }
    }
    Some(out)
}
