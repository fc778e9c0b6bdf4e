//! Editor configuration: every recognized option with its default.
//!
//! Hosts either build an [`EditorConfig`] directly or parse the embedding
//! page's JSON options with [`EditorConfig::from_json`]. Missing keys fall back
//! to their defaults; unknown keys are rejected so typos surface early.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_AUTOSAVE_DEBOUNCE_MS, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE,
    DEFAULT_HISTORY_CAPACITY, MIN_SEATING_SIZE, SNAP_TOLERANCE_PX,
};
use crate::scene::StagePosition;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("grid size must be positive and smaller than the canvas, got {0}")]
    InvalidGrid(f64),
    #[error("history capacity must be at least 1")]
    InvalidHistoryCapacity,
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("invalid editor config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options recognized by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EditorConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Grid pitch in pixels.
    pub grid_size: f64,
    /// Initial stage side.
    pub stage_position: StagePosition,
    /// Maximum number of undo snapshots.
    pub history_capacity: usize,
    /// Quiet period after the last change before auto-save fires.
    pub autosave_debounce_ms: f64,
    /// Alignment snap distance.
    pub snap_tolerance: f64,
    /// Resize floor per axis.
    pub min_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            stage_position: StagePosition::Top,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
            snap_tolerance: SNAP_TOLERANCE_PX,
            min_size: MIN_SEATING_SIZE,
        }
    }
}

impl EditorConfig {
    /// Parse and validate host-provided JSON options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input or unknown keys, and
    /// the relevant variant when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every option is in range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.width) || !is_positive(self.height) {
            return Err(ConfigError::InvalidCanvas { width: self.width, height: self.height });
        }
        if !is_positive(self.grid_size) || self.grid_size > self.width.min(self.height) {
            return Err(ConfigError::InvalidGrid(self.grid_size));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidHistoryCapacity);
        }
        for (field, value) in [
            ("autosaveDebounceMs", self.autosave_debounce_ms),
            ("snapTolerance", self.snap_tolerance),
            ("minSize", self.min_size),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
