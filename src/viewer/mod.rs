//! `MatrixView` - the WASM-exported entry point for the grid UI.
//!
//! Wraps a [`GridSession`] and exposes its state as plain JS data:
//! - Resizing and regenerating the grid
//! - Cell click / hover and row add / remove
//! - Scroll events and the resulting render window
//!
//! On wasm32 the view can also hold element handles for rendered cells so
//! hover highlighting is applied directly without a re-render.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GridConfig;
use crate::engine::random_amount;
#[cfg(target_arch = "wasm32")]
use crate::registry::HighlightRegistry;
use crate::session::GridSession;
use crate::types::CellId;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn to_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// The main view struct exported to JavaScript.
#[wasm_bindgen]
pub struct MatrixView {
    session: GridSession,
    #[cfg(target_arch = "wasm32")]
    registry: HighlightRegistry<web_sys::Element>,
}

#[wasm_bindgen]
impl MatrixView {
    /// Create a view from an optional (possibly partial) config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MatrixView, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };

        Ok(MatrixView {
            session: GridSession::new(config),
            #[cfg(target_arch = "wasm32")]
            registry: HighlightRegistry::new(),
        })
    }

    /// Regenerate the grid with random amounts.
    pub fn resize(&mut self, rows: u32, cols: u32) {
        self.session.resize(rows as usize, cols as usize, random_amount);
        self.sync_highlight();
    }

    /// Set the nearest-cell count; returns the clamped value.
    pub fn set_nearest_count(&mut self, k: u32) -> u32 {
        let k = to_u32(self.session.set_nearest_count(k as usize));
        self.sync_highlight();
        k
    }

    pub fn click_cell(&mut self, cell_id: CellId) {
        self.session.click_cell(cell_id);
        self.sync_highlight();
    }

    /// Hover a cell; returns the ids of its nearest cells.
    pub fn hover_cell(&mut self, cell_id: CellId) -> js_sys::Uint32Array {
        let ids = js_sys::Uint32Array::from(self.session.hover_cell(cell_id));
        self.sync_highlight();
        ids
    }

    pub fn leave_cell(&mut self) {
        self.session.leave_cell();
        self.sync_highlight();
    }

    pub fn hover_sum_row(&mut self, row_index: u32) {
        self.session.hover_sum_row(row_index as usize);
    }

    pub fn leave_sum_row(&mut self) {
        self.session.leave_sum_row();
    }

    pub fn add_row(&mut self) {
        self.session.add_row(random_amount);
        self.sync_highlight();
    }

    /// Remove a row; returns `false` if nothing was removed.
    pub fn remove_row(&mut self, row_index: u32) -> bool {
        let removed = self.session.remove_row(row_index as usize);
        self.sync_highlight();
        removed
    }

    pub fn scroll_to(&mut self, scroll_top: f64, scroll_left: f64) {
        self.session.scroll_to(scroll_top, scroll_left);
    }

    /// Report the scroll container's rendered width.
    pub fn set_container_width(&mut self, width: f64) {
        self.session.set_container_width(width);
    }

    pub fn rows(&self) -> u32 {
        to_u32(self.session.rows())
    }

    pub fn cols(&self) -> u32 {
        to_u32(self.session.cols())
    }

    /// Current snapshot as `{ matrix, rowSums, columnPercentiles }`.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.snapshot())
    }

    /// Current render window as `{ rows, cols }` axis windows.
    pub fn window(&self) -> Result<JsValue, JsValue> {
        let window = self
            .session
            .viewport()
            .try_window(self.session.rows(), self.session.cols())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&window)
    }

    /// Percentage/heatmap data for the hovered sum row, or `undefined`.
    pub fn row_insight(&self) -> Result<JsValue, JsValue> {
        match self.session.row_insight() {
            Some(insight) => to_js(&insight),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn nearest_ids(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(self.session.nearest_ids())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl MatrixView {
    /// Register a rendered cell element for direct highlighting.
    pub fn register_cell(&mut self, cell_id: CellId, element: web_sys::Element) {
        self.registry.register(cell_id, element);
    }

    /// Forget a cell element that left the render window.
    pub fn unregister_cell(&mut self, cell_id: CellId) {
        self.registry.unregister(cell_id);
    }
}

impl MatrixView {
    /// Borrow the underlying session (native callers and tests).
    pub fn session(&self) -> &GridSession {
        &self.session
    }

    #[cfg(target_arch = "wasm32")]
    fn sync_highlight(&mut self) {
        self.registry.apply(self.session.nearest_ids());
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn sync_highlight(&mut self) {}
}
