//! Viewport state management for scrolling.

use super::window::{col_window, row_window, GridWindow};
use crate::config::GridConfig;
use crate::error::{MatrixGridError, Result};

/// Viewport state - scroll offsets, container size and item sizing.
///
/// Held by the view layer; recomputed into a [`GridWindow`] on every scroll
/// and whenever the row/column totals change.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset in pixels
    pub scroll_top: f64,
    /// Horizontal scroll offset in pixels
    pub scroll_left: f64,
    /// Scroll container height in pixels
    pub container_height: f64,
    /// Measured scroll container width in pixels
    pub container_width: f64,
    pub row_height: f64,
    pub column_width: f64,
    pub overscan_rows: usize,
    pub overscan_cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default sizing
    pub fn new() -> Self {
        Self::from_config(&GridConfig::default())
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            container_height: config.container_height,
            container_width: config.container_width,
            row_height: config.row_height,
            column_width: config.column_width,
            overscan_rows: config.overscan_rows,
            overscan_cols: config.overscan_cols,
        }
    }

    /// Check the configuration for contract violations.
    ///
    /// Container sizes must be finite and non-negative; scroll offsets and
    /// item sizes must be finite (non-positive item sizes are allowed and mean
    /// "render everything").
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("container height", self.container_height),
            ("container width", self.container_width),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(MatrixGridError::InvalidViewport(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("scroll top", self.scroll_top),
            ("scroll left", self.scroll_left),
            ("row height", self.row_height),
            ("column width", self.column_width),
        ] {
            if !v.is_finite() {
                return Err(MatrixGridError::InvalidViewport(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Rows and columns to materialize for the current scroll position.
    pub fn window(&self, total_rows: usize, total_cols: usize) -> GridWindow {
        GridWindow {
            rows: row_window(
                total_rows,
                self.scroll_top,
                self.container_height,
                self.row_height,
                self.overscan_rows,
            ),
            cols: col_window(
                total_cols,
                self.scroll_left,
                self.container_width,
                self.column_width,
                self.overscan_cols,
            ),
        }
    }

    /// [`Viewport::window`] with the configuration validated first.
    pub fn try_window(&self, total_rows: usize, total_cols: usize) -> Result<GridWindow> {
        self.validate()?;
        Ok(self.window(total_rows, total_cols))
    }

    /// Full scrollable height for `total_rows`.
    pub fn total_height(&self, total_rows: usize) -> f64 {
        total_rows as f64 * self.row_height.max(0.0)
    }

    /// Full scrollable width for `total_cols`.
    pub fn total_width(&self, total_cols: usize) -> f64 {
        total_cols as f64 * self.column_width.max(0.0)
    }

    /// Clamp scroll position so the end of the content is reachable but
    /// never overshot.
    pub fn clamp_scroll(&mut self, total_rows: usize, total_cols: usize) {
        let max_top = (self.total_height(total_rows) - self.container_height).max(0.0);
        let max_left = (self.total_width(total_cols) - self.container_width).max(0.0);
        self.scroll_top = finite_or_zero(self.scroll_top).clamp(0.0, max_top);
        self.scroll_left = finite_or_zero(self.scroll_left).clamp(0.0, max_left);
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_left: f64, delta_top: f64, totals: (usize, usize)) {
        self.scroll_left += delta_left;
        self.scroll_top += delta_top;
        self.clamp_scroll(totals.0, totals.1);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, top: f64, left: f64, totals: (usize, usize)) {
        self.scroll_top = top;
        self.scroll_left = left;
        self.clamp_scroll(totals.0, totals.1);
    }

    /// Resize the scroll container
    pub fn resize(&mut self, width: f64, height: f64) {
        self.container_width = width;
        self.container_height = height;
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
