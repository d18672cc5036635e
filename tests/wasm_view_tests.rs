//! `MatrixView` tests that need a JS runtime.
//!
//! Run with: wasm-pack test --node

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use matrixgrid::MatrixView;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
fn test_view_resize_and_hover() {
    let mut view = MatrixView::new(JsValue::UNDEFINED).unwrap();
    view.resize(10, 10);
    assert_eq!(view.rows(), 10);
    assert_eq!(view.cols(), 10);

    assert_eq!(view.set_nearest_count(5), 5);
    let ids = view.hover_cell(1).to_vec();
    assert_eq!(ids.len(), 5);
    assert!(!ids.contains(&1));

    view.leave_cell();
    assert_eq!(view.nearest_ids().length(), 0);
}

#[wasm_bindgen_test]
fn test_view_config_object() {
    let config = serde_wasm_bindgen::to_value(&matrixgrid::config::GridConfig {
        allow_remove_last_row: true,
        ..Default::default()
    })
    .unwrap();
    let mut view = MatrixView::new(config).unwrap();
    view.resize(1, 3);
    assert!(view.remove_row(0));
    assert_eq!(view.rows(), 0);
}

#[wasm_bindgen_test]
fn test_view_snapshot_and_window_serialize() {
    let mut view = MatrixView::new(JsValue::NULL).unwrap();
    view.resize(50, 20);
    view.set_container_width(400.0);
    view.scroll_to(400.0, 0.0);
    assert!(view.snapshot().unwrap().is_object());
    assert!(view.window().unwrap().is_object());
    assert!(view.row_insight().unwrap().is_undefined());
    view.hover_sum_row(3);
    assert!(view.row_insight().unwrap().is_object());
}

#[wasm_bindgen_test]
fn test_invalid_config_is_error() {
    assert!(MatrixView::new(JsValue::from_str("not a config")).is_err());
}
