//! Hit-testing against the stage, seatings and resize handles.
//!
//! Priority: the resize handles of a single selected seating win over
//! everything, then the stage marker (drawn on top), then seating bodies from
//! topmost (last inserted) down. A miss means empty canvas.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::geometry::Rect;
use crate::input::UiState;
use crate::scene::{Scene, Seating, SeatingId};

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [ResizeAnchor; 8] = [
        ResizeAnchor::N,
        ResizeAnchor::Ne,
        ResizeAnchor::E,
        ResizeAnchor::Se,
        ResizeAnchor::S,
        ResizeAnchor::Sw,
        ResizeAnchor::W,
        ResizeAnchor::Nw,
    ];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// What the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A resize handle of the single selected seating.
    Handle { id: SeatingId, anchor: ResizeAnchor },
    /// The stage marker.
    Stage,
    /// The body of a seating.
    Seating(SeatingId),
}

/// Handle centers for a box, in [`ResizeAnchor::ALL`] order.
#[must_use]
pub fn resize_handle_positions(rect: &Rect) -> [(ResizeAnchor, Point); 8] {
    let (l, r, t, b) = (rect.x, rect.right(), rect.y, rect.bottom());
    let (cx, cy) = (rect.center_x(), rect.center_y());
    [
        (ResizeAnchor::N, Point::new(cx, t)),
        (ResizeAnchor::Ne, Point::new(r, t)),
        (ResizeAnchor::E, Point::new(r, cy)),
        (ResizeAnchor::Se, Point::new(r, b)),
        (ResizeAnchor::S, Point::new(cx, b)),
        (ResizeAnchor::Sw, Point::new(l, b)),
        (ResizeAnchor::W, Point::new(l, cy)),
        (ResizeAnchor::Nw, Point::new(l, t)),
    ]
}

/// Test what is under `world_pt`.
#[must_use]
pub fn hit_test(world_pt: Point, scene: &Scene, ui: &UiState, camera: &Camera) -> Option<Hit> {
    if let Some(id) = ui.single_selection() {
        if let Some(seating) = scene.get(&id) {
            let radius = camera.screen_dist_to_world(HANDLE_RADIUS_PX);
            let handle = resize_handle_positions(&seating.rect())
                .into_iter()
                .find(|(_, p)| (p.x - world_pt.x).abs() <= radius && (p.y - world_pt.y).abs() <= radius);
            if let Some((anchor, _)) = handle {
                return Some(Hit::Handle { id, anchor });
            }
        }
    }

    if scene.stage().rect().contains(world_pt.x, world_pt.y) {
        return Some(Hit::Stage);
    }

    seating_at(world_pt, scene.seatings()).map(Hit::Seating)
}

/// Topmost seating containing `pt`, if any.
#[must_use]
pub fn seating_at(pt: Point, seatings: &[Seating]) -> Option<SeatingId> {
    seatings
        .iter()
        .rev()
        .find(|s| s.rect().contains(pt.x, pt.y))
        .map(|s| s.id)
}

/// Seatings whose boxes intersect `lasso`, in scene order.
#[must_use]
pub fn lasso_hits(lasso: &Rect, seatings: &[Seating]) -> Vec<SeatingId> {
    seatings
        .iter()
        .filter(|s| lasso.collides(&s.rect()))
        .map(|s| s.id)
        .collect()
}
