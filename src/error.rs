//! Structured error types for matrixgrid.
//!
//! The engine itself degrades silently on bad data (unknown ids, empty input);
//! these errors cover contract violations and the outer JSON/WASM surfaces.

/// All errors that can surface from matrixgrid.
#[derive(Debug, thiserror::Error)]
pub enum MatrixGridError {
    /// Malformed viewport configuration (negative or non-finite sizes).
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatrixGridError>;
