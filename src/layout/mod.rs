//! Viewport windowing for the virtualized grid.
//!
//! This module handles:
//! - Computing which rows and columns to materialize for a scroll position
//! - Padding extents that preserve the true scroll extent
//! - Viewport state (scroll offsets, container size, clamping)

mod viewport;
mod window;

pub use viewport::Viewport;
pub use window::{col_window, row_window, AxisWindow, GridWindow};
