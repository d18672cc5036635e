//! Matrix generation and mutation.
//!
//! Every operation takes the previous snapshot by reference and returns a
//! new one; derived statistics are always recomputed in full. The grid is
//! capped at 100×100 cells so an O(rows·cols) pass per mutation is fine.
//!
//! Amounts come from an injected generator so the engine stays deterministic
//! under test; [`random_amount`] is the production source.

mod random;

pub use random::{random_amount, SeededAmounts, AMOUNT_MAX, AMOUNT_MIN};

use crate::stats;
use crate::types::{Cell, CellId, CellValue, Matrix, MatrixSnapshot};

/// Build a `rows × cols` matrix with row-major ids starting at 1.
///
/// Either dimension being zero yields an empty snapshot.
pub fn generate(
    rows: usize,
    cols: usize,
    mut random_amount: impl FnMut() -> CellValue,
) -> MatrixSnapshot {
    if rows == 0 || cols == 0 {
        tracing::debug!(rows, cols, "generate: empty dimensions");
        return MatrixSnapshot::empty();
    }

    let mut next_id: CellId = 1;
    let matrix: Matrix = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| {
                    let cell = Cell::new(next_id, random_amount());
                    next_id = next_id.saturating_add(1);
                    cell
                })
                .collect()
        })
        .collect();

    tracing::debug!(rows, cols, "generated matrix");
    recalculate(matrix)
}

/// Recompute row sums and column percentiles for `matrix`.
pub fn recalculate(matrix: Matrix) -> MatrixSnapshot {
    let row_sums = matrix.iter().map(|row| stats::row_sum(row)).collect();
    let column_percentiles = stats::column_percentiles(&matrix);
    MatrixSnapshot {
        matrix,
        row_sums,
        column_percentiles,
    }
}

/// Increase the amount of the cell with `cell_id` by one.
///
/// An unknown id returns an unchanged copy of `snapshot`.
pub fn increment_cell(snapshot: &MatrixSnapshot, cell_id: CellId) -> MatrixSnapshot {
    let Some((row_idx, col_idx, _)) = find_cell(snapshot, cell_id) else {
        tracing::trace!(cell_id, "increment_cell: id not found");
        return snapshot.clone();
    };

    let mut matrix = snapshot.matrix.clone();
    if let Some(cell) = matrix.get_mut(row_idx).and_then(|row| row.get_mut(col_idx)) {
        cell.amount = cell.amount.saturating_add(1);
    }
    recalculate(matrix)
}

/// Append one row of `cols` cells with ids continuing after the current maximum.
pub fn add_row(
    snapshot: &MatrixSnapshot,
    cols: usize,
    mut random_amount: impl FnMut() -> CellValue,
) -> MatrixSnapshot {
    let mut next_id = snapshot.max_id().map_or(1, |id| id.saturating_add(1));
    let row = (0..cols)
        .map(|_| {
            let cell = Cell::new(next_id, random_amount());
            next_id = next_id.saturating_add(1);
            cell
        })
        .collect();

    let mut matrix = snapshot.matrix.clone();
    matrix.push(row);
    tracing::debug!(rows = matrix.len(), cols, "added row");
    recalculate(matrix)
}

/// Remove the row at `row_index`.
///
/// Out-of-range indices return an unchanged copy. No minimum row count is
/// enforced here.
pub fn remove_row(snapshot: &MatrixSnapshot, row_index: usize) -> MatrixSnapshot {
    if row_index >= snapshot.row_count() {
        tracing::trace!(row_index, rows = snapshot.row_count(), "remove_row: out of range");
        return snapshot.clone();
    }

    let mut matrix = snapshot.matrix.clone();
    matrix.remove(row_index);
    tracing::debug!(row_index, rows = matrix.len(), "removed row");
    recalculate(matrix)
}

/// Locate a cell by id, returning `(row, col, cell)`.
pub fn find_cell(snapshot: &MatrixSnapshot, cell_id: CellId) -> Option<(usize, usize, Cell)> {
    snapshot
        .matrix
        .iter()
        .enumerate()
        .find_map(|(r, row)| {
            row.iter()
                .enumerate()
                .find(|(_, cell)| cell.id == cell_id)
                .map(|(c, cell)| (r, c, *cell))
        })
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

    fn constant(v: CellValue) -> impl FnMut() -> CellValue {
        move || v
    }

    fn counting(start: CellValue) -> impl FnMut() -> CellValue {
        let mut next = start;
        move || {
            let v = next;
            next += 1;
            v
        }
    }

    #[test]
    fn test_generate_empty_when_any_dimension_zero() {
        assert_eq!(generate(0, 5, constant(100)), MatrixSnapshot::empty());
        assert_eq!(generate(5, 0, constant(100)), MatrixSnapshot::empty());
    }

    #[test]
    fn test_generate_row_major_ids() {
        let snap = generate(2, 3, constant(100));
        let ids: Vec<_> = snap.cells().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(snap.row_sums, vec![300, 300]);
        assert_eq!(snap.column_percentiles, vec![100.0; 3]);
    }

    #[test]
    fn test_two_by_two_scenario() {
        let snap = generate(2, 2, constant(100));
        assert_eq!(
            snap.matrix,
            vec![
                vec![Cell::new(1, 100), Cell::new(2, 100)],
                vec![Cell::new(3, 100), Cell::new(4, 100)],
            ]
        );
        assert_eq!(snap.row_sums, vec![200, 200]);
        assert_eq!(snap.column_percentiles, vec![100.0, 100.0]);

        let snap = increment_cell(&snap, 1);
        assert_eq!(snap.matrix[0][0], Cell::new(1, 101));
        assert_eq!(snap.row_sums, vec![201, 200]);
        // p60 of [101, 100]: rank 0.6 → 100 * 0.4 + 101 * 0.6
        assert!((snap.column_percentiles[0] - 100.6).abs() < 1e-9);
    }

    #[test]
    fn test_increment_unknown_id_is_noop() {
        let snap = generate(3, 3, counting(100));
        assert_eq!(increment_cell(&snap, 42), snap);
    }

    #[test]
    fn test_increment_leaves_original_untouched() {
        let snap = generate(1, 2, constant(500));
        let next = increment_cell(&snap, 2);
        assert_eq!(snap.matrix[0][1].amount, 500);
        assert_eq!(next.matrix[0][1].amount, 501);
    }

    #[test]
    fn test_add_row_continues_ids() {
        let snap = generate(2, 2, constant(100));
        let snap = add_row(&snap, 2, constant(300));
        assert_eq!(snap.row_count(), 3);
        assert_eq!(snap.matrix[2], vec![Cell::new(5, 300), Cell::new(6, 300)]);
        assert_eq!(snap.row_sums, vec![200, 200, 600]);
    }

    #[test]
    fn test_add_row_after_removal_does_not_reuse_ids() {
        let snap = generate(3, 2, constant(100));
        let snap = remove_row(&snap, 2);
        let snap = add_row(&snap, 2, constant(100));
        let ids: Vec<_> = snap.matrix[2].iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_add_row_to_empty_starts_at_one() {
        let snap = add_row(&MatrixSnapshot::empty(), 3, constant(100));
        let ids: Vec<_> = snap.cells().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(snap.column_percentiles.len(), 3);
    }

    #[test]
    fn test_remove_row() {
        let snap = generate(3, 2, counting(100));
        let next = remove_row(&snap, 1);
        assert_eq!(next.row_count(), 2);
        assert_eq!(next.matrix[0], snap.matrix[0]);
        assert_eq!(next.matrix[1], snap.matrix[2]);
        assert_eq!(next.row_sums, vec![snap.row_sums[0], snap.row_sums[2]]);
    }

    #[test]
    fn test_remove_row_out_of_range_is_noop() {
        let snap = generate(2, 2, counting(100));
        assert_eq!(remove_row(&snap, 2), snap);
    }

    #[test]
    fn test_remove_last_row_allowed() {
        let snap = generate(1, 3, constant(100));
        let next = remove_row(&snap, 0);
        assert!(next.is_empty());
        assert!(next.row_sums.is_empty());
        assert!(next.column_percentiles.is_empty());
    }

    #[test]
    fn test_find_cell() {
        let snap = generate(3, 4, counting(100));
        let (r, c, cell) = find_cell(&snap, 7).unwrap();
        assert_eq!((r, c), (1, 2));
        assert_eq!(cell.amount, 106);
        assert!(find_cell(&snap, 13).is_none());
    }
}
