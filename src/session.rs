//! Interactive grid session.
//!
//! Holds the latest snapshot together with hover state, the nearest-cell
//! count and the viewport, and maps view events (click, hover, row actions,
//! scroll) onto engine calls. Each mutation replaces the snapshot wholesale;
//! the last call wins.

use serde::Serialize;

use crate::config::GridConfig;
use crate::engine;
use crate::input::{clamp_nearest_count, MAX_DIMENSION};
use crate::layout::{GridWindow, Viewport};
use crate::nearest::find_nearest_to_cell;
use crate::stats;
use crate::types::{Cell, CellId, CellValue, MatrixSnapshot};

/// Percentage and heatmap view of one row, shown while its sum is hovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowInsight {
    pub row_index: usize,
    pub sum: u64,
    /// Each cell's share of the row sum, in percent
    pub shares: Vec<f64>,
    /// Each cell relative to the row maximum, in `[0, 1]`
    pub heat: Vec<f64>,
}

pub struct GridSession {
    config: GridConfig,
    /// Column count requested by the last resize; new rows use it even
    /// after the grid has been emptied
    declared_cols: usize,
    snapshot: MatrixSnapshot,
    nearest_count: usize,
    hovered_cell: Option<CellId>,
    nearest: Vec<CellId>,
    hovered_sum_row: Option<usize>,
    viewport: Viewport,
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridSession {
    pub fn new(config: GridConfig) -> Self {
        let viewport = Viewport::from_config(&config);
        Self {
            nearest_count: config.nearest_count,
            config,
            declared_cols: 0,
            snapshot: MatrixSnapshot::empty(),
            hovered_cell: None,
            nearest: Vec::new(),
            hovered_sum_row: None,
            viewport,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &MatrixSnapshot {
        &self.snapshot
    }

    pub fn rows(&self) -> usize {
        self.snapshot.row_count()
    }

    /// Columns currently in the grid (0 while it has no rows).
    pub fn cols(&self) -> usize {
        self.snapshot.col_count()
    }

    pub fn declared_cols(&self) -> usize {
        self.declared_cols
    }

    pub fn nearest_count(&self) -> usize {
        self.nearest_count
    }

    pub fn nearest_ids(&self) -> &[CellId] {
        &self.nearest
    }

    pub fn hovered_cell(&self) -> Option<CellId> {
        self.hovered_cell
    }

    pub fn hovered_sum_row(&self) -> Option<usize> {
        self.hovered_sum_row
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Regenerate the grid at a new size.
    ///
    /// Dimensions above [`MAX_DIMENSION`] are clamped. The nearest-cell count
    /// is clamped down to fit the new grid and hover state is dropped since
    /// every id is replaced.
    pub fn resize(
        &mut self,
        rows: usize,
        cols: usize,
        random_amount: impl FnMut() -> CellValue,
    ) {
        let cap = MAX_DIMENSION as usize;
        let (rows, cols) = (rows.min(cap), cols.min(cap));
        self.snapshot = engine::generate(rows, cols, random_amount);
        self.declared_cols = cols;
        self.nearest_count = clamp_nearest_count(self.nearest_count, rows, cols);
        self.hovered_cell = None;
        self.nearest.clear();
        self.hovered_sum_row = None;
        self.clamp_scroll();
        tracing::debug!(rows, cols, k = self.nearest_count, "session resized");
    }

    /// Set how many nearest cells to highlight; returns the clamped value.
    pub fn set_nearest_count(&mut self, k: usize) -> usize {
        self.nearest_count = clamp_nearest_count(k, self.rows(), self.cols());
        self.refresh_nearest();
        self.nearest_count
    }

    /// Increment the clicked cell.
    pub fn click_cell(&mut self, cell_id: CellId) {
        self.snapshot = engine::increment_cell(&self.snapshot, cell_id);
        self.refresh_nearest();
    }

    /// Hover a cell and return the ids to highlight.
    pub fn hover_cell(&mut self, cell_id: CellId) -> &[CellId] {
        self.hovered_cell = Some(cell_id);
        self.refresh_nearest();
        &self.nearest
    }

    pub fn leave_cell(&mut self) {
        self.hovered_cell = None;
        self.nearest.clear();
    }

    pub fn hover_sum_row(&mut self, row_index: usize) {
        self.hovered_sum_row = (row_index < self.rows()).then_some(row_index);
    }

    pub fn leave_sum_row(&mut self) {
        self.hovered_sum_row = None;
    }

    /// Percentage/heatmap data for the hovered sum row.
    pub fn row_insight(&self) -> Option<RowInsight> {
        let row_index = self.hovered_sum_row?;
        let row = self.snapshot.row(row_index)?;
        Some(RowInsight {
            row_index,
            sum: self.snapshot.row_sums.get(row_index).copied().unwrap_or(0),
            shares: stats::row_shares(row),
            heat: stats::row_heat(row),
        })
    }

    /// Append a row of the declared width. Does nothing if that width is 0.
    pub fn add_row(&mut self, random_amount: impl FnMut() -> CellValue) {
        if self.declared_cols == 0 {
            return;
        }
        self.snapshot = engine::add_row(&self.snapshot, self.declared_cols, random_amount);
        self.refresh_nearest();
    }

    /// Remove a row. Returns `false` if nothing was removed.
    ///
    /// Unless [`GridConfig::allow_remove_last_row`] is set, the only
    /// remaining row is kept.
    pub fn remove_row(&mut self, row_index: usize) -> bool {
        if row_index >= self.rows() {
            return false;
        }
        if self.rows() == 1 && !self.config.allow_remove_last_row {
            tracing::debug!("refusing to remove the last row");
            return false;
        }

        let removed_ids: Vec<CellId> = self
            .snapshot
            .row(row_index)
            .map(|row| row.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        self.snapshot = engine::remove_row(&self.snapshot, row_index);

        if self
            .hovered_cell
            .is_some_and(|id| removed_ids.contains(&id))
        {
            self.hovered_cell = None;
        }
        self.hovered_sum_row = match self.hovered_sum_row {
            Some(r) if r == row_index => None,
            Some(r) if r > row_index => Some(r - 1),
            other => other,
        };
        self.nearest_count = clamp_nearest_count(self.nearest_count, self.rows(), self.cols());
        self.refresh_nearest();
        self.clamp_scroll();
        true
    }

    /// Absolute scroll from a scroll event.
    pub fn scroll_to(&mut self, top: f64, left: f64) {
        let totals = (self.rows(), self.cols());
        self.viewport.set_scroll(top, left, totals);
    }

    pub fn scroll_by(&mut self, delta_left: f64, delta_top: f64) {
        let totals = (self.rows(), self.cols());
        self.viewport.scroll_by(delta_left, delta_top, totals);
    }

    /// Record the measured width of the scroll container.
    pub fn set_container_width(&mut self, width: f64) {
        let height = self.viewport.container_height;
        self.viewport.resize(width, height);
        self.clamp_scroll();
    }

    pub fn resize_container(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        self.clamp_scroll();
    }

    /// Current viewport window.
    pub fn window(&self) -> GridWindow {
        self.viewport.window(self.rows(), self.cols())
    }

    /// The materialized rows, each cut to the visible columns.
    pub fn visible_cells(&self) -> Vec<&[Cell]> {
        self.window().slice(&self.snapshot)
    }

    fn refresh_nearest(&mut self) {
        self.nearest = match self.hovered_cell {
            Some(id) => find_nearest_to_cell(&self.snapshot, id, self.nearest_count),
            None => Vec::new(),
        };
    }

    fn clamp_scroll(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        self.viewport.clamp_scroll(rows, cols);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn counting() -> impl FnMut() -> CellValue {
        let mut next = 100;
        move || {
            next += 1;
            next
        }
    }

    fn session(rows: usize, cols: usize, k: usize) -> GridSession {
        let mut s = GridSession::new(GridConfig {
            nearest_count: k,
            ..GridConfig::default()
        });
        s.resize(rows, cols, counting());
        s
    }

    #[test]
    fn test_resize_clamps_dimensions() {
        let s = session(500, 3, 0);
        assert_eq!(s.rows(), 100);
        assert_eq!(s.cols(), 3);
    }

    #[test]
    fn test_resize_clamps_nearest_count_down() {
        let mut s = session(5, 5, 10);
        assert_eq!(s.nearest_count(), 10);
        s.resize(2, 2, counting());
        assert_eq!(s.nearest_count(), 3);
        s.resize(5, 5, counting());
        assert_eq!(s.nearest_count(), 3);
    }

    #[test]
    fn test_hover_then_leave() {
        // amounts 101..=109 row-major; id 5 holds 105
        let mut s = session(3, 3, 2);
        assert_eq!(s.hover_cell(5), &[4, 6]);
        s.leave_cell();
        assert!(s.nearest_ids().is_empty());
        assert_eq!(s.hovered_cell(), None);
    }

    #[test]
    fn test_click_refreshes_nearest_for_hovered_cell() {
        let mut s = session(1, 4, 1);
        // amounts: 101 102 103 104
        assert_eq!(s.hover_cell(1), &[2]);
        s.click_cell(3); // 103 -> 104
        s.click_cell(2); // 102 -> 103
        s.click_cell(2); // 103 -> 104
        // every other cell is now 104; equal amounts resolve to the smaller id
        assert_eq!(s.nearest_ids(), &[2]);
        s.click_cell(1); // 101 -> 102
        assert_eq!(s.snapshot().row_sums, vec![414]);
    }

    #[test]
    fn test_remove_last_row_refused_by_default() {
        let mut s = session(1, 3, 0);
        assert!(!s.remove_row(0));
        assert_eq!(s.rows(), 1);
    }

    #[test]
    fn test_remove_last_row_when_allowed() {
        let mut s = GridSession::new(GridConfig {
            allow_remove_last_row: true,
            ..GridConfig::default()
        });
        s.resize(1, 3, counting());
        assert!(s.remove_row(0));
        assert!(s.snapshot().is_empty());
        assert_eq!(s.cols(), 0);
        assert_eq!(s.declared_cols(), 3);

        s.add_row(|| 200);
        assert_eq!(s.rows(), 1);
        assert_eq!(s.cols(), 3);
        // an emptied grid numbers its next row from 1 again
        let ids: Vec<_> = s.snapshot().cells().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(s.snapshot().row_sums, vec![600]);
    }

    #[test]
    fn test_add_row_with_zero_declared_columns_is_noop() {
        let mut s = session(3, 0, 0);
        s.add_row(|| 200);
        assert!(s.snapshot().is_empty());
    }

    #[test]
    fn test_resize_container_reclamps_scroll() {
        let mut s = session(100, 100, 0);
        s.scroll_to(3200.0, 9000.0);
        // 100 cols * 100px with an unmeasured (0px) container
        assert_eq!(s.viewport().scroll_left, 9000.0);

        s.resize_container(1500.0, 2000.0);
        assert_eq!(s.viewport().scroll_top, 2000.0);
        assert_eq!(s.viewport().scroll_left, 8500.0);
        assert_eq!(s.viewport().total_width(s.cols()), 10_000.0);

        s.scroll_by(-500.0, 100.0);
        assert_eq!(s.viewport().scroll_left, 8000.0);
        assert_eq!(s.viewport().scroll_top, 2000.0);

        let w = s.window();
        assert_eq!(w.rows.end, 100);
        assert_eq!(w.cols.start, 78);
    }

    #[test]
    fn test_remove_row_clears_hover_on_removed_cells() {
        let mut s = session(3, 2, 1);
        s.hover_cell(3);
        s.hover_sum_row(2);
        assert!(s.remove_row(1));
        assert_eq!(s.hovered_cell(), None);
        assert!(s.nearest_ids().is_empty());
        assert_eq!(s.hovered_sum_row(), Some(1));
    }

    #[test]
    fn test_remove_row_reclamps_k() {
        let mut s = session(2, 2, 3);
        assert!(s.remove_row(0));
        assert_eq!(s.nearest_count(), 1);
    }

    #[test]
    fn test_add_row_keeps_column_count() {
        let mut s = session(2, 3, 0);
        s.add_row(|| 500);
        assert_eq!(s.rows(), 3);
        assert_eq!(s.snapshot().row(2).unwrap().len(), 3);
        assert_eq!(s.snapshot().row_sums[2], 1500);
    }

    #[test]
    fn test_row_insight() {
        let mut s = GridSession::default();
        s.resize(2, 2, || 250);
        assert!(s.row_insight().is_none());
        s.hover_sum_row(1);
        let insight = s.row_insight().unwrap();
        assert_eq!(insight.row_index, 1);
        assert_eq!(insight.sum, 500);
        assert_eq!(insight.shares, vec![50.0, 50.0]);
        assert_eq!(insight.heat, vec![1.0, 1.0]);
        s.hover_sum_row(9);
        assert!(s.row_insight().is_none());
    }

    #[test]
    fn test_scroll_is_clamped_and_windowed() {
        let mut s = session(100, 100, 0);
        s.set_container_width(450.0);
        s.scroll_to(1_000_000.0, -20.0);
        // 100 rows * 40px - 800px container
        assert_eq!(s.viewport().scroll_top, 3200.0);
        assert_eq!(s.viewport().scroll_left, 0.0);

        let w = s.window();
        assert_eq!(w.rows.end, 100);
        assert_eq!(w.cols.start, 0);
        assert_eq!(w.cols.end, 9);
        let visible = s.visible_cells();
        assert_eq!(visible.len(), w.rows.len());
        assert_eq!(visible[0].len(), 9);
    }
}
