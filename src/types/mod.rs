//! Data types for the grid engine.

mod cell;
mod snapshot;

pub use cell::*;
pub use snapshot::*;
