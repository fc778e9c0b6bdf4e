#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::scene::SeatingKind;

fn bounds() -> Bounds {
    Bounds { width: 800.0, height: 600.0, grid_size: 20.0 }
}

fn seating(kind: SeatingKind, name: &str, x: f64, y: f64, w: f64, h: f64) -> Seating {
    Seating {
        id: Uuid::new_v4(),
        kind,
        x,
        y,
        width: w,
        height: h,
        capacity: kind.default_capacity(),
        name: name.to_owned(),
        color: "#2ecc71".to_owned(),
        icon: String::new(),
        reserved: false,
    }
}

fn table(x: f64, y: f64) -> Seating {
    seating(SeatingKind::Table, "T", x, y, 60.0, 40.0)
}

// =============================================================
// Rect
// =============================================================

#[test]
fn from_corners_normalizes() {
    let r = Rect::from_corners(100.0, 80.0, 20.0, 10.0);
    assert_eq!(r, Rect::new(20.0, 10.0, 80.0, 70.0));
}

#[test]
fn overlapping_boxes_collide() {
    let a = Rect::new(0.0, 0.0, 60.0, 40.0);
    let b = Rect::new(50.0, 30.0, 60.0, 40.0);
    assert!(a.collides(&b));
    assert!(b.collides(&a));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 60.0, 40.0);
    assert!(!a.collides(&Rect::new(60.0, 0.0, 60.0, 40.0)));
    assert!(!a.collides(&Rect::new(0.0, 40.0, 60.0, 40.0)));
}

#[test]
fn contains_is_inclusive() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(10.0, 10.0));
    assert!(r.contains(30.0, 30.0));
    assert!(!r.contains(30.1, 20.0));
}

#[test]
fn bounds_contains_edges() {
    let b = bounds();
    assert!(b.contains(&Rect::new(0.0, 0.0, 800.0, 600.0)));
    assert!(!b.contains(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
    assert!(!b.contains(&Rect::new(750.0, 0.0, 60.0, 10.0)));
}

// =============================================================
// Collision queries
// =============================================================

#[test]
fn collisions_ignore_self() {
    let a = table(100.0, 100.0);
    let others = vec![a.clone()];
    assert!(collisions(&a.rect(), a.id, &others).is_empty());
    assert!(!has_collision(&a.rect(), a.id, &others));
}

#[test]
fn collisions_list_every_overlap() {
    let a = table(100.0, 100.0);
    let b = table(140.0, 100.0);
    let c = table(400.0, 400.0);
    let all = vec![a.clone(), b.clone(), c];
    let probe = Rect::new(120.0, 110.0, 60.0, 40.0);
    let hits: Vec<SeatingId> = collisions(&probe, Uuid::new_v4(), &all).iter().map(|s| s.id).collect();
    assert_eq!(hits, vec![a.id, b.id]);
}

// =============================================================
// resolve_collision
// =============================================================

#[test]
fn resolve_returns_free_rect_unchanged() {
    let rect = Rect::new(300.0, 300.0, 60.0, 40.0);
    assert_eq!(resolve_collision(&rect, Uuid::new_v4(), &[], bounds()), Some((300.0, 300.0)));
}

#[test]
fn resolve_probes_south_after_north_fails() {
    let existing = vec![table(100.0, 100.0)];
    let rect = Rect::new(120.0, 120.0, 60.0, 40.0);
    assert_eq!(resolve_collision(&rect, Uuid::new_v4(), &existing, bounds()), Some((120.0, 140.0)));
}

#[test]
fn resolve_prefers_north() {
    let existing = vec![table(100.0, 100.0)];
    let rect = Rect::new(100.0, 80.0, 60.0, 40.0);
    assert_eq!(resolve_collision(&rect, Uuid::new_v4(), &existing, bounds()), Some((100.0, 60.0)));
}

#[test]
fn resolve_skips_out_of_bounds_probes() {
    // Top-left corner: N, W and the west/north diagonals leave the canvas.
    let existing = vec![seating(SeatingKind::Seat, "S1", 0.0, 0.0, 20.0, 20.0)];
    let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
    assert_eq!(resolve_collision(&rect, Uuid::new_v4(), &existing, bounds()), Some((0.0, 20.0)));
}

#[test]
fn resolve_gives_up_when_surrounded() {
    let existing = vec![seating(SeatingKind::VipBox, "V", 0.0, 0.0, 200.0, 200.0)];
    let rect = Rect::new(60.0, 60.0, 30.0, 30.0);
    assert_eq!(resolve_collision(&rect, Uuid::new_v4(), &existing, bounds()), None);
}

// =============================================================
// Snapping
// =============================================================

#[test]
fn snap_rounds_to_nearest_multiple() {
    assert_eq!(snap_to_grid(109.0, 20.0), 100.0);
    assert_eq!(snap_to_grid(110.0, 20.0), 120.0);
    assert_eq!(snap_to_grid(-9.0, 20.0), -0.0);
}

#[test]
fn snap_with_zero_grid_is_identity() {
    assert_eq!(snap_to_grid(13.7, 0.0), 13.7);
}

#[test]
fn clamp_keeps_box_inside() {
    assert_eq!(clamp_position(-5.0, 590.0, 60.0, 40.0, bounds()), (0.0, 560.0));
    assert_eq!(clamp_position(790.0, -1.0, 60.0, 40.0, bounds()), (740.0, 0.0));
}

#[test]
fn snap_position_clamps_after_snapping() {
    // 775 snaps to 780, which would overflow by 40.
    assert_eq!(snap_position(775.0, 100.0, 60.0, 40.0, bounds()), (740.0, 100.0));
}

#[test]
fn snap_is_idempotent() {
    let (x, y) = snap_position(133.0, 271.0, 60.0, 40.0, bounds());
    assert_eq!(snap_position(x, y, 60.0, 40.0, bounds()), (x, y));
}

// =============================================================
// Alignment snap
// =============================================================

#[test]
fn alignment_snaps_left_edges() {
    let other = table(200.0, 100.0);
    let moving = Rect::new(205.0, 300.0, 60.0, 40.0);
    let snap = alignment_snap(&moving, Uuid::new_v4(), &[other], 10.0);
    assert_eq!(snap.x, Some(200.0));
    assert_eq!(snap.y, None);
    assert_eq!(snap.guides.len(), 1);
    assert_eq!(snap.guides[0].orientation, Orientation::Vertical);
    assert_eq!(snap.guides[0].coordinate, 200.0);
}

#[test]
fn alignment_snaps_centers_vertically() {
    let other = seating(SeatingKind::VipBox, "V", 400.0, 100.0, 80.0, 60.0);
    // Center y 128 vs 130.
    let moving = Rect::new(100.0, 108.0, 60.0, 40.0);
    let snap = alignment_snap(&moving, Uuid::new_v4(), &[other], 10.0);
    assert_eq!(snap.y, Some(110.0));
    assert_eq!(snap.guides[0].orientation, Orientation::Horizontal);
}

#[test]
fn alignment_picks_closest_candidate() {
    let near = table(203.0, 0.0);
    let far = table(208.0, 300.0);
    let moving = Rect::new(201.0, 500.0, 60.0, 40.0);
    let snap = alignment_snap(&moving, Uuid::new_v4(), &[far, near], 10.0);
    assert_eq!(snap.x, Some(203.0));
}

#[test]
fn alignment_outside_tolerance_is_ignored() {
    let other = table(200.0, 100.0);
    let moving = Rect::new(300.0, 300.0, 30.0, 30.0);
    let snap = alignment_snap(&moving, Uuid::new_v4(), &[other], 10.0);
    assert_eq!(snap, AlignmentSnap::default());
}

// =============================================================
// Auto-arrange
// =============================================================

#[test]
fn auto_arrange_orders_by_kind_then_name() {
    let t2 = seating(SeatingKind::Table, "T2", 500.0, 500.0, 60.0, 40.0);
    let s1 = seating(SeatingKind::Seat, "S1", 600.0, 500.0, 30.0, 30.0);
    let t1 = seating(SeatingKind::Table, "T1", 700.0, 500.0, 60.0, 40.0);
    let moves = auto_arrange(&[t2.clone(), s1.clone(), t1.clone()], bounds());
    assert_eq!(
        moves,
        vec![(s1.id, 50.0, 80.0), (t1.id, 150.0, 80.0), (t2.id, 250.0, 80.0)]
    );
}

#[test]
fn auto_arrange_wraps_rows() {
    let narrow = Bounds { width: 300.0, height: 600.0, grid_size: 20.0 };
    let items: Vec<Seating> = (1..=4)
        .map(|i| seating(SeatingKind::Seat, &format!("S{i}"), 0.0, 300.0 + f64::from(i) * 40.0, 30.0, 30.0))
        .collect();
    let moves = auto_arrange(&items, narrow);
    let positions: Vec<(f64, f64)> = moves.iter().map(|(_, x, y)| (*x, *y)).collect();
    assert_eq!(positions, vec![(50.0, 80.0), (150.0, 80.0), (250.0, 80.0), (50.0, 160.0)]);
}

#[test]
fn auto_arrange_skips_cells_outside_canvas() {
    let small = Bounds { width: 100.0, height: 100.0, grid_size: 20.0 };
    let big = seating(SeatingKind::VipBox, "V1", 0.0, 0.0, 80.0, 60.0);
    assert!(auto_arrange(&[big], small).is_empty());
}

#[test]
fn auto_arrange_skips_colliding_cells() {
    // An unmoved VIP box sits over the second cell.
    let blocker = seating(SeatingKind::VipBox, "V1", 140.0, 70.0, 80.0, 60.0);
    let a = seating(SeatingKind::Seat, "S1", 600.0, 500.0, 30.0, 30.0);
    let b = seating(SeatingKind::Seat, "S2", 700.0, 500.0, 30.0, 30.0);
    let moves = auto_arrange(&[blocker.clone(), a.clone(), b.clone()], bounds());
    let ids: Vec<SeatingId> = moves.iter().map(|(id, _, _)| *id).collect();
    assert_eq!(ids, vec![a.id, blocker.id]);
    assert!(!ids.contains(&b.id));
}

// =============================================================
// Align / distribute
// =============================================================

#[test]
fn align_left_uses_minimum_x() {
    let rects = [Rect::new(100.0, 0.0, 60.0, 40.0), Rect::new(40.0, 100.0, 30.0, 30.0)];
    assert_eq!(align(&rects, Alignment::Left), vec![(40.0, 0.0), (40.0, 100.0)]);
}

#[test]
fn align_right_and_bottom() {
    let rects = [Rect::new(100.0, 0.0, 60.0, 40.0), Rect::new(40.0, 100.0, 30.0, 30.0)];
    assert_eq!(align(&rects, Alignment::Right), vec![(100.0, 0.0), (130.0, 100.0)]);
    assert_eq!(align(&rects, Alignment::Bottom), vec![(100.0, 90.0), (40.0, 100.0)]);
}

#[test]
fn align_center_averages() {
    let rects = [Rect::new(0.0, 0.0, 20.0, 20.0), Rect::new(100.0, 50.0, 20.0, 20.0)];
    assert_eq!(align(&rects, Alignment::Center), vec![(50.0, 0.0), (50.0, 50.0)]);
    assert_eq!(align(&rects, Alignment::Middle), vec![(0.0, 25.0), (100.0, 25.0)]);
}

#[test]
fn align_empty_is_empty() {
    assert!(align(&[], Alignment::Top).is_empty());
}

#[test]
fn distribute_needs_three() {
    let rects = [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(100.0, 0.0, 10.0, 10.0)];
    assert_eq!(distribute(&rects, Axis::Horizontal), None);
}

#[test]
fn distribute_spaces_leading_edges() {
    let rects = [
        Rect::new(300.0, 0.0, 30.0, 30.0),
        Rect::new(0.0, 10.0, 30.0, 30.0),
        Rect::new(40.0, 20.0, 30.0, 30.0),
    ];
    assert_eq!(
        distribute(&rects, Axis::Horizontal),
        Some(vec![(300.0, 0.0), (0.0, 10.0), (150.0, 20.0)])
    );
}

#[test]
fn distribute_vertical_keeps_x() {
    let rects = [
        Rect::new(5.0, 0.0, 30.0, 30.0),
        Rect::new(6.0, 10.0, 30.0, 30.0),
        Rect::new(7.0, 20.0, 30.0, 30.0),
        Rect::new(8.0, 300.0, 30.0, 30.0),
    ];
    assert_eq!(
        distribute(&rects, Axis::Vertical),
        Some(vec![(5.0, 0.0), (6.0, 100.0), (7.0, 200.0), (8.0, 300.0)])
    );
}
