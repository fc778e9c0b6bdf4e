//! Rendering: draws the layout, the stage and the selection overlay.
//!
//! Drawing goes through the [`Surface`] trait so the same code paints a real
//! [`web_sys::CanvasRenderingContext2d`] and the recording surface used in
//! tests. [`draw`] reads a [`RenderView`] and never mutates editor state;
//! calling it twice with the same view issues the same calls.
//!
//! Everything except the selection badge is drawn in canvas coordinates under
//! the camera transform.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::geometry::{GuideLine, Orientation, Rect};
use crate::hit;
use crate::input::UiState;
use crate::scene::{Scene, Seating};

pub const BACKGROUND_COLOR: &str = "#ffffff";
pub const GRID_COLOR: &str = "#ecf0f1";
pub const BORDER_COLOR: &str = "#bdc3c7";
pub const OUTLINE_COLOR: &str = "#2c3e50";
pub const TEXT_COLOR: &str = "#2c3e50";
pub const STAGE_COLOR: &str = "#34495e";
pub const SELECTION_COLOR: &str = "#1E90FF";
pub const HANDLE_FILL: &str = "#fff";
pub const GUIDE_COLOR: &str = "#e84393";
pub const COLLISION_COLOR: &str = "#e74c3c";
pub const MARQUEE_FILL: &str = "rgba(30, 144, 255, 0.12)";
pub const BADGE_FILL: &str = "rgba(44, 62, 80, 0.85)";

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Guide dash segment length in screen pixels.
const GUIDE_DASH_PX: f64 = 6.0;

/// Reserved seatings are drawn faded.
const RESERVED_ALPHA: f64 = 0.45;

const LABEL_FONT: &str = "11px sans-serif";
const ICON_FONT: &str = "16px sans-serif";

/// Read-only view of everything a frame needs.
pub struct RenderView<'a> {
    pub scene: &'a Scene,
    pub ui: &'a UiState,
    pub camera: &'a Camera,
    /// Whether the collision indicator is currently showing.
    pub collision: bool,
}

/// Text placement and style for [`Surface::text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    /// CSS text-align value.
    pub align: &'a str,
}

impl<'a> TextStyle<'a> {
    /// Centered on the anchor point in both axes.
    #[must_use]
    pub fn centered(font: &'a str, color: &'a str) -> Self {
        Self { font, color, align: "center" }
    }
}

/// The 2D drawing operations the renderer needs.
///
/// Fallible operations mirror the fallible calls of the browser canvas API.
pub trait Surface {
    type Error;

    fn save(&self);
    fn restore(&self);
    /// Replace the transform with a uniform scale followed by a translation.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure.
    fn set_transform(&self, scale: f64, translate_x: f64, translate_y: f64) -> Result<(), Self::Error>;
    /// Clear `width × height` from the origin under the current transform.
    fn clear(&self, width: f64, height: f64);
    fn fill_rect(&self, rect: Rect, color: &str);
    fn stroke_rect(&self, rect: Rect, color: &str, line_width: f64);
    fn line(&self, from: Point, to: Point, color: &str, line_width: f64);
    /// # Errors
    ///
    /// Propagates the backend's failure.
    fn text(&self, text: &str, at: Point, style: TextStyle<'_>) -> Result<(), Self::Error>;
    /// Dash pattern for subsequent strokes. An empty slice draws solid lines.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure.
    fn set_dash(&self, segments: &[f64]) -> Result<(), Self::Error>;
    fn set_alpha(&self, alpha: f64);
}

/// Draw one full frame.
///
/// # Errors
///
/// Returns the surface's error if any fallible call fails.
pub fn draw<S: Surface>(surface: &S, view: &RenderView<'_>) -> Result<(), S::Error> {
    let bounds = view.scene.bounds();
    let camera = view.camera;
    let zoom = camera.zoom;

    // Layer 1: clear in screen space, then switch to canvas space.
    surface.set_transform(1.0, 0.0, 0.0)?;
    surface.clear(bounds.width, bounds.height);
    surface.set_transform(zoom, camera.pan_x, camera.pan_y)?;

    // Layer 2: paper, grid and border.
    let paper = Rect::new(0.0, 0.0, bounds.width, bounds.height);
    surface.fill_rect(paper, BACKGROUND_COLOR);
    draw_grid(surface, paper, bounds.grid_size, zoom);
    surface.stroke_rect(paper, BORDER_COLOR, 1.0 / zoom);

    // Layer 3: seatings in insertion order, stage on top.
    for seating in view.scene.seatings() {
        draw_seating(surface, seating, zoom)?;
    }
    draw_stage(surface, view.scene.stage().rect(), zoom)?;

    // Layer 4: selection overlay.
    let selected: Vec<&Seating> = view
        .ui
        .selection
        .iter()
        .filter_map(|id| view.scene.get(id))
        .collect();
    for seating in &selected {
        draw_selection_box(surface, seating.rect(), zoom)?;
    }
    if let [only] = selected.as_slice() {
        draw_handles(surface, only.rect(), zoom);
    }
    if view.collision {
        for seating in &selected {
            surface.stroke_rect(seating.rect(), COLLISION_COLOR, 3.0 / zoom);
        }
    }
    for guide in &view.ui.guides {
        draw_guide(surface, guide, zoom)?;
    }
    if let Some(marquee) = view.ui.marquee {
        draw_marquee(surface, marquee, zoom)?;
    }

    if selected.len() > 1 {
        draw_badge(surface, selected.len())?;
    }
    Ok(())
}

// =============================================================
// Layers
// =============================================================

fn draw_grid<S: Surface>(surface: &S, paper: Rect, grid: f64, zoom: f64) {
    if grid <= 0.0 {
        return;
    }
    let width = 1.0 / zoom;
    let mut x = 0.0;
    while x <= paper.width {
        surface.line(Point::new(x, 0.0), Point::new(x, paper.height), GRID_COLOR, width);
        x += grid;
    }
    let mut y = 0.0;
    while y <= paper.height {
        surface.line(Point::new(0.0, y), Point::new(paper.width, y), GRID_COLOR, width);
        y += grid;
    }
}

fn draw_seating<S: Surface>(surface: &S, seating: &Seating, zoom: f64) -> Result<(), S::Error> {
    let rect = seating.rect();
    let label = TextStyle::centered(LABEL_FONT, TEXT_COLOR);

    surface.save();
    if seating.reserved {
        surface.set_alpha(RESERVED_ALPHA);
    }
    surface.fill_rect(rect, &seating.color);
    surface.stroke_rect(rect, OUTLINE_COLOR, 1.0 / zoom);
    surface.text(
        &seating.icon,
        Point::new(rect.center_x(), rect.center_y()),
        TextStyle::centered(ICON_FONT, TEXT_COLOR),
    )?;
    surface.text(&seating.name, Point::new(rect.center_x(), rect.y - 8.0), label)?;
    surface.text(
        &seating.capacity.to_string(),
        Point::new(rect.center_x(), rect.bottom() + 8.0),
        label,
    )?;
    surface.restore();
    Ok(())
}

fn draw_stage<S: Surface>(surface: &S, rect: Rect, zoom: f64) -> Result<(), S::Error> {
    surface.fill_rect(rect, STAGE_COLOR);
    surface.stroke_rect(rect, OUTLINE_COLOR, 1.0 / zoom);
    surface.text(
        "STAGE",
        Point::new(rect.center_x(), rect.center_y()),
        TextStyle::centered(LABEL_FONT, BACKGROUND_COLOR),
    )
}

fn draw_selection_box<S: Surface>(surface: &S, rect: Rect, zoom: f64) -> Result<(), S::Error> {
    let dash = SELECTION_DASH_PX / zoom;
    surface.set_dash(&[dash, dash])?;
    surface.stroke_rect(rect, SELECTION_COLOR, 2.0 / zoom);
    surface.set_dash(&[])
}

fn draw_handles<S: Surface>(surface: &S, rect: Rect, zoom: f64) {
    let half = HANDLE_RADIUS_PX / zoom;
    for (_, p) in hit::resize_handle_positions(&rect) {
        let handle = Rect::new(p.x - half, p.y - half, half * 2.0, half * 2.0);
        surface.fill_rect(handle, HANDLE_FILL);
        surface.stroke_rect(handle, SELECTION_COLOR, 1.0 / zoom);
    }
}

fn draw_guide<S: Surface>(surface: &S, guide: &GuideLine, zoom: f64) -> Result<(), S::Error> {
    let (from, to) = match guide.orientation {
        Orientation::Vertical => (
            Point::new(guide.coordinate, guide.start),
            Point::new(guide.coordinate, guide.end),
        ),
        Orientation::Horizontal => (
            Point::new(guide.start, guide.coordinate),
            Point::new(guide.end, guide.coordinate),
        ),
    };
    let dash = GUIDE_DASH_PX / zoom;
    surface.set_dash(&[dash, dash])?;
    surface.line(from, to, GUIDE_COLOR, 1.0 / zoom);
    surface.set_dash(&[])
}

fn draw_marquee<S: Surface>(surface: &S, marquee: Rect, zoom: f64) -> Result<(), S::Error> {
    let dash = SELECTION_DASH_PX / zoom;
    surface.set_dash(&[dash, dash])?;
    surface.fill_rect(marquee, MARQUEE_FILL);
    surface.stroke_rect(marquee, SELECTION_COLOR, 1.0 / zoom);
    surface.set_dash(&[])
}

/// "N selected" in the top-left corner of the view, unaffected by the camera.
fn draw_badge<S: Surface>(surface: &S, count: usize) -> Result<(), S::Error> {
    surface.set_transform(1.0, 0.0, 0.0)?;
    surface.fill_rect(Rect::new(8.0, 8.0, 96.0, 22.0), BADGE_FILL);
    surface.text(
        &format!("{count} selected"),
        Point::new(56.0, 19.0),
        TextStyle::centered(LABEL_FONT, BACKGROUND_COLOR),
    )
}

// =============================================================
// Browser canvas
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_transform(&self, scale: f64, translate_x: f64, translate_y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_transform(self, scale, 0.0, 0.0, scale, translate_x, translate_y)
    }

    fn clear(&self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&self, rect: Rect, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&self, rect: Rect, color: &str, line_width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(line_width);
        CanvasRenderingContext2d::stroke_rect(self, rect.x, rect.y, rect.width, rect.height);
    }

    fn line(&self, from: Point, to: Point, color: &str, line_width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(line_width);
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
    }

    fn text(&self, text: &str, at: Point, style: TextStyle<'_>) -> Result<(), JsValue> {
        self.set_font(style.font);
        self.set_fill_style_str(style.color);
        self.set_text_align(style.align);
        self.set_text_baseline("middle");
        self.fill_text(text, at.x, at.y)
    }

    fn set_dash(&self, segments: &[f64]) -> Result<(), JsValue> {
        let dash_array = js_sys::Array::new();
        for segment in segments {
            dash_array.push(&(*segment).into());
        }
        self.set_line_dash(&dash_array)
    }

    fn set_alpha(&self, alpha: f64) {
        self.set_global_alpha(alpha);
    }
}
