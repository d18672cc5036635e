//! matrixgrid - virtualized numeric grid engine
//!
//! The computational core behind an interactive M×N grid of numbers:
//! - Matrix generation, cell increment and row add/remove with row sums and
//!   60th-percentile column summaries recomputed on every change
//! - Top-K nearest-value search with a bounded priority queue
//! - Viewport windowing that materializes only the visible rows and columns
//!   while preserving the full scroll extent
//! - Up to 100×100 cells, fully synchronous
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { MatrixView } from 'matrixgrid';
//! await init();
//! const view = new MatrixView({ rowHeight: 40, nearestCount: 5 });
//! view.resize(100, 100);
//! const nearest = view.hover_cell(42);
//! const { rows, cols } = view.window();
//! ```

// Engine
pub mod engine;
pub mod error;
pub mod nearest;
pub mod stats;
pub mod types;

// View-facing state
pub mod config;
pub mod input;
pub mod layout;
pub mod registry;
pub mod session;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use viewer::MatrixView;

pub use types::*;

/// Generate a `rows × cols` grid of random amounts and return its snapshot
/// as a JSON string.
///
/// # Errors
/// Returns an error if the snapshot cannot be serialized.
#[wasm_bindgen]
pub fn generate_matrix_json(rows: u32, cols: u32) -> Result<String, JsValue> {
    let rows = input::clamp_dimension(u64::from(rows)) as usize;
    let cols = input::clamp_dimension(u64::from(cols)) as usize;
    let snapshot = engine::generate(rows, cols, engine::random_amount);
    serde_json::to_string(&snapshot)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn generated(rows: u32, cols: u32) -> serde_json::Value {
        let json = generate_matrix_json(rows, cols).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_generate_matrix_json_shape() {
        let value = generated(3, 4);
        assert_eq!(value["matrix"].as_array().unwrap().len(), 3);
        assert_eq!(value["matrix"][0].as_array().unwrap().len(), 4);
        assert_eq!(value["rowSums"].as_array().unwrap().len(), 3);
        assert_eq!(value["columnPercentiles"].as_array().unwrap().len(), 4);

        let amount = value["matrix"][2][3]["amount"].as_u64().unwrap();
        assert!((100..=999).contains(&amount));
        assert_eq!(value["matrix"][2][3]["id"], 12);
    }

    #[test]
    fn test_generate_matrix_json_clamps_dimensions() {
        let value = generated(500, 2);
        assert_eq!(value["rowSums"].as_array().unwrap().len(), 100);
        assert_eq!(value["columnPercentiles"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_generate_matrix_json_empty() {
        let value = generated(0, 7);
        assert!(value["matrix"].as_array().unwrap().is_empty());
        assert!(value["columnPercentiles"].as_array().unwrap().is_empty());
    }
}
