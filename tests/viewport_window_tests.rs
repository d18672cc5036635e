//! Viewport windowing tests
//!
//! Tests for visible row/column ranges, padding extents and scroll clamping.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use matrixgrid::config::GridConfig;
use matrixgrid::error::MatrixGridError;
use matrixgrid::layout::{col_window, row_window, AxisWindow, Viewport};
use test_case::test_case;

fn assert_extent(w: &AxisWindow, total: usize, item: f64) {
    let sum = w.leading_pad + w.len() as f64 * item + w.trailing_pad;
    assert!(
        (sum - total as f64 * item).abs() < 1e-6,
        "padding + materialized extent {sum} != total {}",
        total as f64 * item
    );
    assert!(w.start <= w.end && w.end <= total, "bad bounds {w:?}");
}

// =============================================================================
// ROW WINDOW
// =============================================================================

#[test]
fn test_reference_example() {
    let w = row_window(1000, 2000.0, 600.0, 40.0, 5);
    assert_eq!(w.start, 48);
    assert_eq!(w.end, 68);
    assert_eq!(w.leading_pad, 1920.0);
    assert_eq!(w.trailing_pad, 37280.0);
}

#[test_case(0.0, 0, 25; "top")]
#[test_case(39.0, 0, 25; "inside first row")]
#[test_case(80.0, 0, 25; "overscan floor at zero")]
#[test_case(120.0, 1, 26; "first shift")]
#[test_case(3200.0, 78, 100; "bottom")]
fn test_row_window_positions(scroll_top: f64, start: usize, end: usize) {
    let w = row_window(100, scroll_top, 800.0, 40.0, 5);
    assert_eq!((w.start, w.end), (start, end), "scroll_top={scroll_top}");
    assert_extent(&w, 100, 40.0);
}

#[test]
fn test_extent_preserved_across_scroll_range() {
    let total = 10_000;
    let mut top = 0.0;
    while top <= total as f64 * 40.0 {
        let w = row_window(total, top, 800.0, 40.0, 5);
        assert_extent(&w, total, 40.0);
        top += 137.0;
    }
}

#[test]
fn test_fractional_row_height() {
    let w = row_window(50, 100.0, 333.0, 33.3, 3);
    assert_extent(&w, 50, 33.3);
    // floor(100 / 33.3) = 3, minus floor(3/2) = 1
    assert_eq!(w.start, 2);
}

#[test]
fn test_window_size_never_exceeds_visible_count() {
    for top in [0.0, 500.0, 1_000.0, 100_000.0] {
        let w = row_window(10_000, top, 600.0, 40.0, 5);
        assert!(w.len() <= 20);
    }
}

// =============================================================================
// COLUMN WINDOW
// =============================================================================

#[test]
fn test_col_window_symmetric_to_rows() {
    let r = row_window(500, 2500.0, 640.0, 100.0, 4);
    let c = col_window(500, 2500.0, 640.0, 100.0, 4);
    assert_eq!(r, c);
}

#[test]
fn test_col_window_narrow_grid() {
    let w = col_window(3, 0.0, 1200.0, 100.0, 4);
    assert_eq!(w, AxisWindow::full(3));
}

// =============================================================================
// VIEWPORT STATE
// =============================================================================

#[test]
fn test_viewport_defaults_from_config() {
    let viewport = Viewport::new();
    assert_eq!(viewport.scroll_top, 0.0);
    assert_eq!(viewport.scroll_left, 0.0);
    assert_eq!(viewport.row_height, 40.0);
    assert_eq!(viewport.column_width, 100.0);
    assert_eq!(viewport.container_height, 800.0);
    assert_eq!(viewport.overscan_rows, 5);
    assert_eq!(viewport.overscan_cols, 4);
}

#[test]
fn test_viewport_window_both_axes() {
    let mut viewport = Viewport::from_config(&GridConfig {
        container_height: 600.0,
        container_width: 500.0,
        ..GridConfig::default()
    });
    viewport.set_scroll(2000.0, 1000.0, (1000, 100));
    let w = viewport.window(1000, 100);
    assert_eq!(w.visible_rows(), 48..68);
    // ceil(500/100)+4 = 9, start = 10 - 2
    assert_eq!(w.visible_cols(), 8..17);
}

#[test]
fn test_clamp_scroll_to_content() {
    let mut viewport = Viewport::new();
    viewport.resize(500.0, 600.0);
    viewport.set_scroll(1e9, 1e9, (100, 100));
    assert_eq!(viewport.scroll_top, 100.0 * 40.0 - 600.0);
    assert_eq!(viewport.scroll_left, 100.0 * 100.0 - 500.0);

    viewport.scroll_by(-1e9, -1e9, (100, 100));
    assert_eq!(viewport.scroll_top, 0.0);
    assert_eq!(viewport.scroll_left, 0.0);
}

#[test]
fn test_clamp_scroll_small_content() {
    let mut viewport = Viewport::new();
    viewport.set_scroll(300.0, 300.0, (2, 2));
    assert_eq!(viewport.scroll_top, 0.0);
    assert_eq!(viewport.scroll_left, 0.0);
}

#[test]
fn test_try_window_rejects_negative_container() {
    let mut viewport = Viewport::new();
    viewport.container_height = -1.0;
    let err = viewport.try_window(10, 10).unwrap_err();
    assert!(matches!(err, MatrixGridError::InvalidViewport(_)));
    assert!(err.to_string().contains("container height"));
}

#[test]
fn test_try_window_rejects_non_finite_scroll() {
    let mut viewport = Viewport::new();
    viewport.scroll_top = f64::INFINITY;
    assert!(viewport.try_window(10, 10).is_err());
}

#[test]
fn test_try_window_accepts_zero_row_height() {
    let mut viewport = Viewport::new();
    viewport.row_height = 0.0;
    let w = viewport.try_window(42, 0).unwrap();
    assert_eq!(w.rows, AxisWindow::full(42));
}
