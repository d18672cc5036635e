//! Row/column windowing for a virtualized grid.
//!
//! Given a scroll offset and container size, decides which contiguous range
//! of items to materialize plus the padding extents that stand in for the
//! rest. For every window `leading_pad + (end - start) * item + trailing_pad`
//! equals `total * item`, so the scrollbar keeps its true length and position.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::types::{Cell, MatrixSnapshot};

/// Materialized range along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisWindow {
    /// First materialized index (inclusive)
    pub start: usize,
    /// Last materialized index (exclusive)
    pub end: usize,
    /// Extent before `start` (top pad for rows, left pad for columns)
    pub leading_pad: f64,
    /// Extent after `end` (bottom pad for rows, right pad for columns)
    pub trailing_pad: f64,
}

impl AxisWindow {
    /// Window covering all `total` items with no padding.
    pub fn full(total: usize) -> Self {
        Self {
            start: 0,
            end: total,
            leading_pad: 0.0,
            trailing_pad: 0.0,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of materialized items; an inverted window counts as empty.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Row and column windows for one viewport state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridWindow {
    pub rows: AxisWindow,
    pub cols: AxisWindow,
}

impl GridWindow {
    pub fn visible_rows(&self) -> Range<usize> {
        self.rows.range()
    }

    pub fn visible_cols(&self) -> Range<usize> {
        self.cols.range()
    }

    /// Whether the cell at `(row, col)` is materialized.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows.contains(row) && self.cols.contains(col)
    }

    /// The materialized part of `snapshot`: visible rows, each cut to the
    /// visible columns. Out-of-range windows produce fewer (or no) rows.
    pub fn slice<'a>(&self, snapshot: &'a MatrixSnapshot) -> Vec<&'a [Cell]> {
        let rows = clamp_range(self.visible_rows(), snapshot.row_count());
        snapshot
            .matrix
            .get(rows)
            .unwrap_or_default()
            .iter()
            .map(|row| {
                row.get(clamp_range(self.visible_cols(), row.len()))
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn clamp_range(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    range.start.min(end)..end
}

/// Rows to materialize for a vertical scroll position.
///
/// `row_height <= 0` degrades to rendering every row without padding.
pub fn row_window(
    total_rows: usize,
    scroll_top: f64,
    container_height: f64,
    row_height: f64,
    overscan: usize,
) -> AxisWindow {
    debug_assert!(
        container_height.is_finite() && container_height >= 0.0,
        "container height must be finite and non-negative, got {container_height}"
    );
    axis_window(total_rows, scroll_top, container_height, row_height, overscan)
}

/// Columns to materialize for a horizontal scroll position.
///
/// `container_width` is the measured width of the scroll container.
pub fn col_window(
    total_cols: usize,
    scroll_left: f64,
    container_width: f64,
    column_width: f64,
    overscan_cols: usize,
) -> AxisWindow {
    debug_assert!(
        container_width.is_finite() && container_width >= 0.0,
        "container width must be finite and non-negative, got {container_width}"
    );
    axis_window(
        total_cols,
        scroll_left,
        container_width,
        column_width,
        overscan_cols,
    )
}

fn axis_window(
    total: usize,
    offset: f64,
    container: f64,
    item_size: f64,
    overscan: usize,
) -> AxisWindow {
    // NaN fails the comparison too
    if !(item_size.is_finite() && item_size > 0.0) {
        return AxisWindow::full(total);
    }

    let container = sanitize(container);
    let offset = sanitize(offset);

    let visible = to_index((container / item_size).ceil()).saturating_add(overscan);
    let first = to_index((offset / item_size).floor());
    let start = first.saturating_sub(overscan / 2).min(total);
    let end = start.saturating_add(visible).min(total);

    AxisWindow {
        start,
        end,
        leading_pad: start as f64 * item_size,
        trailing_pad: ((total - end) as f64 * item_size).max(0.0),
    }
}

/// Negative and non-finite extents collapse to zero.
fn sanitize(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// `v` is finite and non-negative; `as` saturates anything past `usize::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_index(v: f64) -> usize {
    v as usize
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
    use test_case::test_case;

    fn assert_extent_preserved(w: &AxisWindow, total: usize, item: f64) {
        let materialized = w.len() as f64 * item;
        let sum = w.leading_pad + materialized + w.trailing_pad;
        assert!(
            (sum - total as f64 * item).abs() < 1e-6,
            "extent mismatch: {w:?} total={total} item={item}"
        );
    }

    #[test]
    fn test_reference_scroll_position() {
        let w = row_window(1000, 2000.0, 600.0, 40.0, 5);
        assert_eq!(w.start, 48);
        assert_eq!(w.end, 68);
        assert_eq!(w.leading_pad, 1920.0);
        assert_eq!(w.trailing_pad, 37280.0);
        assert_extent_preserved(&w, 1000, 40.0);
    }

    #[test]
    fn test_top_of_grid() {
        let w = row_window(100, 0.0, 800.0, 40.0, 5);
        assert_eq!((w.start, w.end), (0, 25));
        assert_eq!(w.leading_pad, 0.0);
        assert_eq!(w.trailing_pad, 75.0 * 40.0);
    }

    #[test]
    fn test_small_grid_fits_entirely() {
        let w = row_window(3, 0.0, 800.0, 40.0, 5);
        assert_eq!((w.start, w.end), (0, 3));
        assert_eq!(w.trailing_pad, 0.0);
    }

    #[test]
    fn test_scrolled_past_end_stays_in_bounds() {
        let w = row_window(10, 100_000.0, 400.0, 40.0, 4);
        assert!(w.start <= w.end && w.end <= 10);
        assert!(w.is_empty());
        assert_extent_preserved(&w, 10, 40.0);
    }

    #[test_case(0.0; "zero height")]
    #[test_case(-5.0; "negative height")]
    #[test_case(f64::NAN; "nan height")]
    fn test_non_positive_item_size_renders_all(item: f64) {
        let w = row_window(250, 1234.0, 600.0, item, 5);
        assert_eq!(w, AxisWindow::full(250));
    }

    #[test]
    fn test_col_window_uses_measured_width() {
        let w = col_window(100, 1000.0, 450.0, 100.0, 4);
        // ceil(450/100)+4 = 9, start = 10 - 2 = 8
        assert_eq!((w.start, w.end), (8, 17));
        assert_eq!(w.leading_pad, 800.0);
        assert_eq!(w.trailing_pad, 83.0 * 100.0);
    }

    #[test]
    fn test_unmeasured_container_still_renders_overscan() {
        let w = col_window(100, 0.0, 0.0, 100.0, 4);
        assert_eq!((w.start, w.end), (0, 4));
    }

    #[test]
    fn test_negative_scroll_treated_as_zero() {
        let w = row_window(100, -30.0, 400.0, 40.0, 2);
        assert_eq!(w.start, 0);
    }

    #[test]
    fn test_zero_total() {
        let w = row_window(0, 500.0, 400.0, 40.0, 5);
        assert_eq!(w, AxisWindow::full(0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "container height")]
    fn test_negative_container_fails_loudly_in_debug() {
        let _ = row_window(10, 0.0, -1.0, 40.0, 0);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let w: AxisWindow =
            serde_json::from_str(r#"{"start":9,"end":3,"leadingPad":0.0,"trailingPad":0.0}"#)
                .unwrap();
        assert_eq!(w.len(), 0);
        assert!(w.is_empty());
        assert!(!w.contains(5));
    }

    #[test]
    fn test_slice_cuts_rows_and_columns() {
        let snap = crate::engine::generate(5, 5, || 100);
        let window = GridWindow {
            rows: AxisWindow {
                start: 1,
                end: 3,
                ..AxisWindow::default()
            },
            cols: AxisWindow {
                start: 2,
                end: 9,
                ..AxisWindow::default()
            },
        };
        let slice = window.slice(&snap);
        assert_eq!(slice.len(), 2);
        let ids: Vec<_> = slice[0].iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![8, 9, 10]);
        assert!(window.contains(2, 4));
        assert!(!window.contains(0, 4));
    }
}
