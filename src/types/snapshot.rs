use serde::{Deserialize, Serialize};

use super::{Cell, CellId, Matrix};

/// Immutable matrix plus its derived statistics.
///
/// Produced by every engine operation; never mutated after construction
/// except through the engine, which always returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSnapshot {
    pub matrix: Matrix,
    /// `row_sums[i]` = sum of amounts in row `i`
    pub row_sums: Vec<u64>,
    /// `column_percentiles[j]` = 60th percentile of column `j`
    pub column_percentiles: Vec<f64>,
}

impl MatrixSnapshot {
    /// Snapshot with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.matrix.len()
    }

    /// Column count taken from the first row (rows are uniform).
    pub fn col_count(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.matrix.iter().map(Vec::len).sum()
    }

    /// Sum of every cell in the matrix.
    pub fn total(&self) -> u64 {
        self.row_sums.iter().sum()
    }

    /// Largest id present, or `None` for an empty matrix.
    pub fn max_id(&self) -> Option<CellId> {
        self.cells().map(|c| c.id).max()
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.matrix.iter().flatten()
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.matrix.get(index).map(Vec::as_slice)
    }
}
