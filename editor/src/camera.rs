#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// Camera state for pan/zoom over the layout canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within [`ZOOM_MIN`, `ZOOM_MAX`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set the zoom factor while keeping the canvas point under `screen_anchor` fixed.
    pub fn zoom_about(&mut self, screen_anchor: Point, zoom: f64) {
        let world = self.screen_to_world(screen_anchor);
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self.pan_x = screen_anchor.x - world.x * self.zoom;
        self.pan_y = screen_anchor.y - world.y * self.zoom;
    }

    /// Step the zoom in by one notch, anchored at the top-left corner.
    pub fn zoom_in(&mut self) {
        self.zoom_about(Point::new(self.pan_x, self.pan_y), self.zoom * ZOOM_STEP);
    }

    /// Step the zoom out by one notch, anchored at the top-left corner.
    pub fn zoom_out(&mut self) {
        self.zoom_about(Point::new(self.pan_x, self.pan_y), self.zoom / ZOOM_STEP);
    }

    /// Restore identity zoom and pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom level as a rounded percentage, for the zoom indicator.
    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        // Zoom is clamped to [0.3, 3.0], so the product always fits.
        #[allow(clippy::cast_possible_truncation)]
        let pct = (self.zoom * 100.0).round() as i64;
        pct
    }
}
