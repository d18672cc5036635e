//! Grid configuration.
//!
//! Deserializes from JSON (CLI `--config`) or from a JS object on the WASM
//! side. Every field has a default so partial configs are accepted.

use serde::{Deserialize, Serialize};

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 40.0;
/// Default column width in pixels.
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;
/// Default scroll container height in pixels.
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 800.0;
/// Extra rows rendered around the visible range.
pub const DEFAULT_OVERSCAN_ROWS: usize = 5;
/// Extra columns rendered around the visible range.
pub const DEFAULT_OVERSCAN_COLS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub row_height: f64,
    pub column_width: f64,
    pub container_height: f64,
    /// Measured container width; 0 until the view reports it.
    pub container_width: f64,
    pub overscan_rows: usize,
    pub overscan_cols: usize,
    /// Initial nearest-cell count (clamped against the grid size)
    pub nearest_count: usize,
    /// Whether the session lets the user remove the only remaining row
    pub allow_remove_last_row: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            container_width: 0.0,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            overscan_cols: DEFAULT_OVERSCAN_COLS,
            nearest_count: 0,
            allow_remove_last_row: false,
        }
    }
}

impl GridConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = GridConfig::from_json(r#"{"rowHeight": 32, "nearestCount": 3}"#).unwrap();
        assert_eq!(cfg.row_height, 32.0);
        assert_eq!(cfg.nearest_count, 3);
        assert_eq!(cfg.column_width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(cfg.overscan_rows, DEFAULT_OVERSCAN_ROWS);
        assert!(!cfg.allow_remove_last_row);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GridConfig::from_json("{rowHeight:").is_err());
    }
}
