//! Reports over a saved layout: a capacity summary and a validation pass.
//!
//! Both work on [`SeatingDto`] lists as they come out of a configuration, so
//! they can check files that were edited by hand or produced elsewhere.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use serde::Serialize;

use crate::geometry::{Bounds, Rect};
use crate::persist::SeatingDto;
use crate::scene::SeatingKind;

const KINDS: [SeatingKind; 3] = [SeatingKind::Table, SeatingKind::Seat, SeatingKind::VipBox];

/// Totals for one seating kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSummary {
    pub kind: SeatingKind,
    pub count: usize,
    pub capacity: u64,
    pub reserved: usize,
}

/// Totals for a whole layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub total: usize,
    pub total_capacity: u64,
    pub reserved: usize,
    pub available: usize,
    /// Capacity of the seatings that are not reserved.
    pub open_capacity: u64,
    /// One entry per kind, tables first.
    pub by_kind: Vec<KindSummary>,
}

#[must_use]
pub fn summarize(seatings: &[SeatingDto]) -> LayoutSummary {
    let by_kind = KINDS
        .iter()
        .map(|&kind| {
            let of_kind = seatings.iter().filter(|s| s.kind == kind);
            KindSummary {
                kind,
                count: of_kind.clone().count(),
                capacity: of_kind.clone().map(|s| u64::from(s.capacity)).sum(),
                reserved: of_kind.filter(|s| s.reserved).count(),
            }
        })
        .collect();
    let reserved = seatings.iter().filter(|s| s.reserved).count();
    LayoutSummary {
        total: seatings.len(),
        total_capacity: seatings.iter().map(|s| u64::from(s.capacity)).sum(),
        reserved,
        available: seatings.len() - reserved,
        open_capacity: seatings
            .iter()
            .filter(|s| !s.reserved)
            .map(|s| u64::from(s.capacity))
            .sum(),
        by_kind,
    }
}

/// A problem found in a saved layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutIssue {
    #[error("{name}: capacity must be at least 1")]
    ZeroCapacity { name: String },
    #[error("{name}: position ({x}, {y}) is negative")]
    NegativePosition { name: String, x: f64, y: f64 },
    #[error("{name}: size {width}x{height} is not positive")]
    InvalidSize { name: String, width: f64, height: f64 },
    #[error("{name}: extends past the {width}x{height} canvas")]
    OutsideCanvas { name: String, width: f64, height: f64 },
    #[error("{first} overlaps {second}")]
    Overlap { first: String, second: String },
}

impl LayoutIssue {
    /// Warnings are fixed by the editor on load or on the next move; they do
    /// not make a layout invalid.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::OutsideCanvas { .. } | Self::Overlap { .. })
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<LayoutIssue>,
    pub warnings: Vec<LayoutIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, issue: LayoutIssue) {
        if issue.is_warning() {
            self.warnings.push(issue);
        } else {
            self.issues.push(issue);
        }
    }
}

/// Check every seating against `bounds` and against each other.
///
/// Seatings with a bad size are left out of the overlap check.
#[must_use]
pub fn validate(seatings: &[SeatingDto], bounds: Bounds) -> ValidationReport {
    let mut report = ValidationReport::default();
    for s in seatings {
        if s.capacity == 0 {
            report.push(LayoutIssue::ZeroCapacity { name: s.name.clone() });
        }
        if s.x < 0.0 || s.y < 0.0 {
            report.push(LayoutIssue::NegativePosition { name: s.name.clone(), x: s.x, y: s.y });
        }
        if !has_valid_size(s) {
            report.push(LayoutIssue::InvalidSize { name: s.name.clone(), width: s.width, height: s.height });
        } else if s.x + s.width > bounds.width || s.y + s.height > bounds.height {
            report.push(LayoutIssue::OutsideCanvas {
                name: s.name.clone(),
                width: bounds.width,
                height: bounds.height,
            });
        }
    }

    let sized: Vec<&SeatingDto> = seatings.iter().filter(|s| has_valid_size(s)).collect();
    for (i, a) in sized.iter().enumerate() {
        for b in &sized[i + 1..] {
            if rect_of(a).collides(&rect_of(b)) {
                report.push(LayoutIssue::Overlap { first: a.name.clone(), second: b.name.clone() });
            }
        }
    }

    tracing::debug!(issues = report.issues.len(), warnings = report.warnings.len(), "layout validated");
    report
}

fn has_valid_size(s: &SeatingDto) -> bool {
    s.width.is_finite() && s.width > 0.0 && s.height.is_finite() && s.height > 0.0
}

fn rect_of(s: &SeatingDto) -> Rect {
    Rect::new(s.x, s.y, s.width, s.height)
}
