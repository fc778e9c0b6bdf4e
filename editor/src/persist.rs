//! Persistence adapter: scene ⇄ plain configuration object.
//!
//! [`LayoutConfig`] is the only shape the embedding application sees. Export
//! carries just the externally relevant fields; selection and other transient
//! UI state never leave the editor.
//!
//! Import is tolerant. Every top-level key of [`PartialLayoutConfig`] is
//! optional and applied only when present, and each seating entry is parsed on
//! its own so one malformed entry does not abort the load.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::scene::{Scene, Seating, SeatingAttrs, SeatingId, SeatingKind, StagePosition};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One seating as saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingDto {
    pub id: SeatingId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeatingKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub capacity: u32,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub reserved: bool,
}

impl From<&Seating> for SeatingDto {
    fn from(s: &Seating) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            kind: s.kind,
            x: s.x,
            y: s.y,
            width: s.width,
            height: s.height,
            capacity: s.capacity,
            color: s.color.clone(),
            icon: s.icon.clone(),
            reserved: s.reserved,
        }
    }
}

/// Full layout as handed to the host for saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub stage_position: StagePosition,
    pub grid_size: f64,
    pub seatings: Vec<SeatingDto>,
}

/// Layout as accepted for loading; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLayoutConfig {
    /// Unknown side names (e.g. `"center"`) are ignored.
    #[serde(default, deserialize_with = "lenient_stage_position")]
    pub stage_position: Option<StagePosition>,
    #[serde(default)]
    pub grid_size: Option<f64>,
    /// Raw entries; each is validated individually on load.
    #[serde(default)]
    pub seatings: Option<Vec<serde_json::Value>>,
}

impl From<&LayoutConfig> for PartialLayoutConfig {
    fn from(cfg: &LayoutConfig) -> Self {
        Self {
            stage_position: Some(cfg.stage_position),
            grid_size: Some(cfg.grid_size),
            seatings: Some(
                cfg.seatings
                    .iter()
                    .map(|s| serde_json::to_value(s).unwrap_or(serde_json::Value::Null))
                    .collect(),
            ),
        }
    }
}

/// Outcome of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Loose view of a saved seating; geometry presence is checked after parsing.
#[derive(Debug, Deserialize)]
struct RawSeating {
    #[serde(rename = "type")]
    kind: Option<SeatingKind>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    capacity: Option<u32>,
    name: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    #[serde(default)]
    reserved: bool,
}

fn lenient_stage_position<'de, D>(deserializer: D) -> Result<Option<StagePosition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_value::<StagePosition>(raw.clone()) {
        Ok(pos) => Ok(Some(pos)),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "ignoring unknown stage position");
            Ok(None)
        }
    }
}

/// Export the scene.
#[must_use]
pub fn to_configuration(scene: &Scene) -> LayoutConfig {
    LayoutConfig {
        stage_position: scene.stage_position(),
        grid_size: scene.bounds().grid_size,
        seatings: scene.seatings().iter().map(SeatingDto::from).collect(),
    }
}

/// Apply `cfg` to `scene`, replacing all seatings when `seatings` is present.
///
/// Entries are placed through the trusted path (no collision check, no grid
/// snap, clamped to the canvas) and receive fresh ids. Entries without `x`/`y`,
/// with a non-positive size or capacity, or with wrongly typed fields are
/// skipped.
pub fn apply_configuration(scene: &mut Scene, cfg: &PartialLayoutConfig) -> LoadReport {
    if let Some(pos) = cfg.stage_position {
        scene.set_stage_position(pos);
    }

    if let Some(grid) = cfg.grid_size {
        if grid.is_finite() && grid > 0.0 {
            scene.set_grid_size(grid);
        } else {
            tracing::warn!(grid, "ignoring non-positive grid size");
        }
    }

    let mut report = LoadReport::default();
    let Some(entries) = cfg.seatings.as_ref() else {
        return report;
    };

    scene.clear();
    for (index, entry) in entries.iter().enumerate() {
        match seating_from_entry(scene, entry) {
            Some(seating) => {
                scene.insert_trusted(seating);
                report.loaded += 1;
            }
            None => {
                tracing::warn!(index, "skipping invalid seating entry");
                report.skipped += 1;
            }
        }
    }
    tracing::debug!(loaded = report.loaded, skipped = report.skipped, "layout loaded");
    report
}

fn seating_from_entry(scene: &Scene, entry: &serde_json::Value) -> Option<Seating> {
    let raw = match serde_json::from_value::<RawSeating>(entry.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!(error = %e, "seating entry has wrongly typed fields");
            return None;
        }
    };
    let (x, y) = (raw.x?, raw.y?);
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    if raw.width.is_some_and(|w| !(w.is_finite() && w > 0.0))
        || raw.height.is_some_and(|h| !(h.is_finite() && h > 0.0))
        || raw.capacity == Some(0)
    {
        return None;
    }

    let attrs = SeatingAttrs {
        width: raw.width,
        height: raw.height,
        capacity: raw.capacity,
        name: raw.name,
        color: raw.color,
        icon: raw.icon,
        reserved: raw.reserved,
    };
    Some(scene.build(raw.kind.unwrap_or(SeatingKind::Table), x, y, &attrs))
}

/// Serialize a configuration as pretty JSON.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if serialization fails.
pub fn to_json(cfg: &LayoutConfig) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(cfg)?)
}

/// Parse a (possibly partial) configuration.
///
/// # Errors
///
/// Returns [`PersistError::Json`] when the document itself is malformed.
/// Malformed individual seatings are not errors; they are skipped on apply.
pub fn from_json(raw: &str) -> Result<PartialLayoutConfig, PersistError> {
    Ok(serde_json::from_str(raw)?)
}
