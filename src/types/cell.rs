use serde::{Deserialize, Serialize};

/// Unique cell identifier within a snapshot.
pub type CellId = u32;

/// Cell amount (non-negative).
pub type CellValue = u32;

/// A single grid entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub amount: CellValue,
}

impl Cell {
    pub fn new(id: CellId, amount: CellValue) -> Self {
        Self { id, amount }
    }

    /// Absolute difference between this cell's amount and `target`.
    pub fn distance_to(&self, target: CellValue) -> u32 {
        self.amount.abs_diff(target)
    }
}

/// A cell paired with its distance to a target amount.
///
/// Only lives for the duration of a nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWithDistance {
    pub id: CellId,
    pub amount: CellValue,
    pub distance: u32,
}

impl CellWithDistance {
    pub fn from_cell(cell: &Cell, target: CellValue) -> Self {
        Self {
            id: cell.id,
            amount: cell.amount,
            distance: cell.distance_to(target),
        }
    }

    /// Ordering key: closer first, smaller amount breaks ties.
    ///
    /// The id is a final tie-break so equally ranked cells resolve the same
    /// way regardless of queue layout.
    pub fn rank_key(&self) -> (u32, CellValue, CellId) {
        (self.distance, self.amount, self.id)
    }
}

/// One row of cells.
pub type MatrixRow = Vec<Cell>;

/// Ordered rows of uniform length.
pub type Matrix = Vec<MatrixRow>;
