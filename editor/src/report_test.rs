#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn seating(name: &str, kind: SeatingKind, x: f64, y: f64, capacity: u32) -> SeatingDto {
    let (width, height) = kind.default_size();
    SeatingDto {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        kind,
        x,
        y,
        width,
        height,
        capacity,
        color: kind.default_color(capacity).to_owned(),
        icon: kind.default_icon().to_owned(),
        reserved: false,
    }
}

fn canvas() -> Bounds {
    Bounds { width: 800.0, height: 600.0, grid_size: 20.0 }
}

// =============================================================
// summarize
// =============================================================

#[test]
fn summary_of_empty_layout() {
    let summary = summarize(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.total_capacity, 0);
    assert_eq!(summary.by_kind.len(), 3);
    assert!(summary.by_kind.iter().all(|k| k.count == 0));
}

#[test]
fn summary_counts_per_kind_and_reservations() {
    let mut reserved_table = seating("T2", SeatingKind::Table, 200.0, 100.0, 6);
    reserved_table.reserved = true;
    let layout = vec![
        seating("T1", SeatingKind::Table, 100.0, 100.0, 4),
        reserved_table,
        seating("S1", SeatingKind::Seat, 400.0, 100.0, 1),
        seating("VIP1", SeatingKind::VipBox, 500.0, 300.0, 8),
    ];
    let summary = summarize(&layout);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.total_capacity, 19);
    assert_eq!(summary.reserved, 1);
    assert_eq!(summary.available, 3);
    assert_eq!(summary.open_capacity, 13);
    assert_eq!(
        summary.by_kind[0],
        KindSummary { kind: SeatingKind::Table, count: 2, capacity: 10, reserved: 1 }
    );
    assert_eq!(summary.by_kind[2].kind, SeatingKind::VipBox);
    assert_eq!(summary.by_kind[2].capacity, 8);
}

#[test]
fn summary_serializes_camel_case() {
    let value = serde_json::to_value(summarize(&[])).unwrap();
    assert!(value.get("totalCapacity").is_some());
    assert!(value.get("byKind").is_some());
}

// =============================================================
// validate
// =============================================================

#[test]
fn clean_layout_is_valid() {
    let layout = vec![
        seating("T1", SeatingKind::Table, 100.0, 100.0, 4),
        seating("T2", SeatingKind::Table, 160.0, 100.0, 4),
    ];
    let report = validate(&layout, canvas());
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn hard_issues_make_layout_invalid() {
    let mut flat = seating("T3", SeatingKind::Table, 300.0, 300.0, 4);
    flat.height = 0.0;
    let layout = vec![
        seating("T1", SeatingKind::Table, 100.0, 100.0, 0),
        seating("T2", SeatingKind::Table, -5.0, 100.0, 4),
        flat,
    ];
    let report = validate(&layout, canvas());
    assert!(!report.is_valid());
    assert_eq!(report.issues.len(), 3);
    assert!(matches!(report.issues[0], LayoutIssue::ZeroCapacity { .. }));
    assert!(matches!(report.issues[1], LayoutIssue::NegativePosition { x, .. } if x == -5.0));
    assert!(matches!(report.issues[2], LayoutIssue::InvalidSize { .. }));
}

#[test]
fn overlap_and_overflow_are_warnings() {
    let layout = vec![
        seating("T1", SeatingKind::Table, 100.0, 100.0, 4),
        seating("T2", SeatingKind::Table, 130.0, 120.0, 4),
        seating("T3", SeatingKind::Table, 780.0, 100.0, 4),
    ];
    let report = validate(&layout, canvas());
    assert!(report.is_valid());
    assert_eq!(
        report.warnings,
        vec![
            LayoutIssue::OutsideCanvas { name: "T3".to_owned(), width: 800.0, height: 600.0 },
            LayoutIssue::Overlap { first: "T1".to_owned(), second: "T2".to_owned() },
        ]
    );
}

#[test]
fn issue_messages_name_the_seating() {
    let issue = LayoutIssue::Overlap { first: "T1".to_owned(), second: "S4".to_owned() };
    assert_eq!(issue.to_string(), "T1 overlaps S4");
    assert!(issue.is_warning());
    assert!(!LayoutIssue::ZeroCapacity { name: "T1".to_owned() }.is_warning());
}
