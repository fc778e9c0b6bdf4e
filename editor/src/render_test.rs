#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::convert::Infallible;

use super::*;
use crate::geometry::GuideLine;
use crate::scene::{SeatingAttrs, SeatingId, SeatingKind, StagePosition};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Save,
    Restore,
    Transform(f64, f64, f64),
    Clear,
    Fill(Rect, String),
    Stroke(Rect, String),
    Line(Point, Point, String),
    Text(String),
    Dash(Vec<f64>),
    Alpha(f64),
}

#[derive(Default)]
struct Recorder {
    ops: RefCell<Vec<Op>>,
}

impl Recorder {
    fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    fn texts(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    fn fills_with(&self, color: &str) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Fill(_, c) if c == color))
            .count()
    }

    fn strokes_with(&self, color: &str) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Stroke(_, c) if c == color))
            .count()
    }

    fn lines_with(&self, color: &str) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Line(_, _, c) if c == color))
            .count()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn save(&self) {
        self.ops.borrow_mut().push(Op::Save);
    }

    fn restore(&self) {
        self.ops.borrow_mut().push(Op::Restore);
    }

    fn set_transform(&self, scale: f64, translate_x: f64, translate_y: f64) -> Result<(), Infallible> {
        self.ops.borrow_mut().push(Op::Transform(scale, translate_x, translate_y));
        Ok(())
    }

    fn clear(&self, _width: f64, _height: f64) {
        self.ops.borrow_mut().push(Op::Clear);
    }

    fn fill_rect(&self, rect: Rect, color: &str) {
        self.ops.borrow_mut().push(Op::Fill(rect, color.to_owned()));
    }

    fn stroke_rect(&self, rect: Rect, color: &str, _line_width: f64) {
        self.ops.borrow_mut().push(Op::Stroke(rect, color.to_owned()));
    }

    fn line(&self, from: Point, to: Point, color: &str, _line_width: f64) {
        self.ops.borrow_mut().push(Op::Line(from, to, color.to_owned()));
    }

    fn text(&self, text: &str, _at: Point, _style: TextStyle<'_>) -> Result<(), Infallible> {
        self.ops.borrow_mut().push(Op::Text(text.to_owned()));
        Ok(())
    }

    fn set_dash(&self, segments: &[f64]) -> Result<(), Infallible> {
        self.ops.borrow_mut().push(Op::Dash(segments.to_vec()));
        Ok(())
    }

    fn set_alpha(&self, alpha: f64) {
        self.ops.borrow_mut().push(Op::Alpha(alpha));
    }
}

struct Fixture {
    scene: Scene,
    ui: UiState,
    camera: Camera,
    ids: Vec<SeatingId>,
}

fn fixture() -> Fixture {
    let mut scene = Scene::new(800.0, 600.0, 20.0, StagePosition::Top);
    let ids = [(100.0, 100.0), (300.0, 100.0)]
        .into_iter()
        .filter_map(|(x, y)| scene.add_object(SeatingKind::Table, x, y, &SeatingAttrs::default()))
        .collect();
    Fixture { scene, ui: UiState::default(), camera: Camera::default(), ids }
}

fn render(f: &Fixture, collision: bool) -> Recorder {
    let recorder = Recorder::default();
    let view = RenderView { scene: &f.scene, ui: &f.ui, camera: &f.camera, collision };
    match draw(&recorder, &view) {
        Ok(()) => recorder,
        Err(never) => match never {},
    }
}

// =============================================================
// Frame setup
// =============================================================

#[test]
fn clears_in_screen_space_then_applies_camera() {
    let mut f = fixture();
    f.camera = Camera { pan_x: 15.0, pan_y: -5.0, zoom: 2.0 };
    let ops = render(&f, false).ops();
    assert_eq!(ops[0], Op::Transform(1.0, 0.0, 0.0));
    assert_eq!(ops[1], Op::Clear);
    assert_eq!(ops[2], Op::Transform(2.0, 15.0, -5.0));
}

#[test]
fn grid_covers_the_canvas() {
    let r = render(&fixture(), false);
    // 41 vertical lines for 800 px and 31 horizontal for 600 px at a 20 px pitch.
    assert_eq!(r.lines_with(GRID_COLOR), 72);
}

// =============================================================
// Seatings and stage
// =============================================================

#[test]
fn seatings_show_name_icon_and_capacity() {
    let r = render(&fixture(), false);
    let texts = r.texts();
    for expected in ["T1", "T2", "4", "🪑", "STAGE"] {
        assert!(texts.iter().any(|t| t == expected), "missing {expected}: {texts:?}");
    }
    assert_eq!(r.fills_with("#2ecc71"), 2);
    assert_eq!(r.fills_with(STAGE_COLOR), 1);
}

#[test]
fn reserved_seatings_are_faded() {
    let mut f = fixture();
    f.scene
        .add_object(
            SeatingKind::Seat,
            500.0,
            300.0,
            &SeatingAttrs { reserved: true, ..Default::default() },
        )
        .unwrap();
    let ops = render(&f, false).ops();
    assert_eq!(ops.iter().filter(|op| **op == Op::Alpha(RESERVED_ALPHA)).count(), 1);
    assert_eq!(
        ops.iter().filter(|op| **op == Op::Save).count(),
        ops.iter().filter(|op| **op == Op::Restore).count()
    );
}

// =============================================================
// Selection overlay
// =============================================================

#[test]
fn no_selection_draws_no_overlay() {
    let r = render(&fixture(), true);
    assert_eq!(r.strokes_with(SELECTION_COLOR), 0);
    assert_eq!(r.strokes_with(COLLISION_COLOR), 0);
    assert!(!r.texts().iter().any(|t| t.ends_with("selected")));
}

#[test]
fn single_selection_draws_eight_handles() {
    let mut f = fixture();
    f.ui.selection = vec![f.ids[0]];
    let r = render(&f, false);
    assert_eq!(r.fills_with(HANDLE_FILL), 8);
    // Dashed box plus one outline per handle.
    assert_eq!(r.strokes_with(SELECTION_COLOR), 9);
    assert!(r.ops().contains(&Op::Dash(vec![SELECTION_DASH_PX, SELECTION_DASH_PX])));
}

#[test]
fn handle_size_is_constant_on_screen() {
    let mut f = fixture();
    f.ui.selection = vec![f.ids[0]];
    f.camera.zoom = 2.0;
    let handle = render(&f, false).ops().into_iter().find_map(|op| match op {
        Op::Fill(rect, color) if color == HANDLE_FILL => Some(rect),
        _ => None,
    });
    assert_eq!(handle.map(|r| r.width), Some(HANDLE_RADIUS_PX));
}

#[test]
fn multi_selection_shows_badge_without_handles() {
    let mut f = fixture();
    f.ui.selection.clone_from(&f.ids);
    let r = render(&f, false);
    assert_eq!(r.fills_with(HANDLE_FILL), 0);
    assert_eq!(r.strokes_with(SELECTION_COLOR), 2);
    assert!(r.texts().contains(&"2 selected".to_owned()));
    assert_eq!(r.fills_with(BADGE_FILL), 1);
}

#[test]
fn collision_outline_only_while_flashing() {
    let mut f = fixture();
    f.ui.selection = vec![f.ids[0]];
    assert_eq!(render(&f, false).strokes_with(COLLISION_COLOR), 0);
    assert_eq!(render(&f, true).strokes_with(COLLISION_COLOR), 1);
}

#[test]
fn guides_and_marquee_are_dashed() {
    let mut f = fixture();
    f.ui.guides = vec![
        GuideLine { orientation: Orientation::Vertical, coordinate: 100.0, start: 0.0, end: 200.0 },
        GuideLine { orientation: Orientation::Horizontal, coordinate: 50.0, start: 10.0, end: 90.0 },
    ];
    f.ui.marquee = Some(Rect::new(10.0, 10.0, 50.0, 50.0));
    let r = render(&f, false);
    assert_eq!(r.lines_with(GUIDE_COLOR), 2);
    assert!(r.ops().contains(&Op::Line(
        Point::new(100.0, 0.0),
        Point::new(100.0, 200.0),
        GUIDE_COLOR.to_owned()
    )));
    assert_eq!(r.fills_with(MARQUEE_FILL), 1);
    assert_eq!(r.ops().last(), Some(&Op::Dash(Vec::new())));
}

#[test]
fn drawing_is_idempotent() {
    let mut f = fixture();
    f.ui.selection = vec![f.ids[1]];
    assert_eq!(render(&f, true).ops(), render(&f, true).ops());
}
