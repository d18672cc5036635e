//! Nearest-value search over a matrix.
//!
//! Selects the `k` cells whose amounts are closest to a target amount using a
//! [`BoundedPriorityQueue`], giving O(n log k) instead of sorting all n cells.
//! Ranking is `(distance, amount)` ascending, so among equally distant cells
//! the smaller amount wins. Cells with identical amounts fall back to the
//! smaller id, which keeps the result independent of scan order.

mod bounded_queue;

pub use bounded_queue::BoundedPriorityQueue;

use crate::types::{CellId, CellValue, CellWithDistance, Matrix, MatrixSnapshot};

/// Ids of the `k` cells closest in value to `target_amount`, closest first.
///
/// The target cell itself is skipped. `k == 0` returns an empty result.
pub fn find_nearest(
    matrix: &Matrix,
    target_cell_id: CellId,
    target_amount: CellValue,
    k: usize,
) -> Vec<CellId> {
    // Capacity never needs to exceed the number of cells.
    let k = k.min(matrix.iter().map(Vec::len).sum());
    if k == 0 {
        return Vec::new();
    }

    let mut queue =
        BoundedPriorityQueue::with_capacity(k, |a: &CellWithDistance, b: &CellWithDistance| {
            a.rank_key().cmp(&b.rank_key())
        });

    for cell in matrix.iter().flatten() {
        if cell.id == target_cell_id {
            continue;
        }
        queue.push_bounded(CellWithDistance::from_cell(cell, target_amount));
    }

    let nearest: Vec<CellId> = queue.into_sorted_vec().iter().map(|c| c.id).collect();
    tracing::trace!(target_cell_id, k, found = nearest.len(), "nearest search");
    nearest
}

/// Like [`find_nearest`], looking up the target's amount from the snapshot.
///
/// An unknown target id yields an empty result.
pub fn find_nearest_to_cell(
    snapshot: &MatrixSnapshot,
    target_cell_id: CellId,
    k: usize,
) -> Vec<CellId> {
    match snapshot.cells().find(|c| c.id == target_cell_id) {
        Some(target) => find_nearest(&snapshot.matrix, target.id, target.amount, k),
        None => Vec::new(),
    }
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
    use crate::types::Cell;

    fn matrix_of(rows: &[&[u32]]) -> Matrix {
        let mut id = 0;
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|&amount| {
                        id += 1;
                        Cell::new(id, amount)
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_k_zero_is_empty() {
        let m = matrix_of(&[&[100, 200], &[300, 400]]);
        assert!(find_nearest(&m, 1, 100, 0).is_empty());
    }

    #[test]
    fn test_excludes_target() {
        let m = matrix_of(&[&[500, 500, 500]]);
        let ids = find_nearest(&m, 2, 500, 5);
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_orders_by_distance() {
        // ids:      1    2    3    4    5
        let m = matrix_of(&[&[500, 530, 480, 900], &[505]]);
        let ids = find_nearest(&m, 1, 500, 3);
        assert_eq!(ids, vec![5, 3, 2]);
    }

    #[test]
    fn test_tie_broken_by_smaller_amount() {
        // 490 and 510 are both 10 away from 500
        let m = matrix_of(&[&[500, 510, 490, 700]]);
        assert_eq!(find_nearest(&m, 1, 500, 1), vec![3]);
        assert_eq!(find_nearest(&m, 1, 500, 2), vec![3, 2]);
    }

    #[test]
    fn test_equal_amounts_prefer_smaller_id() {
        let m = matrix_of(&[&[100, 200, 200, 200]]);
        assert_eq!(find_nearest(&m, 1, 100, 1), vec![2]);
        assert_eq!(find_nearest(&m, 1, 100, 2), vec![2, 3]);
    }

    #[test]
    fn test_tie_resolution_independent_of_queue_layout() {
        // 300 arrives last but outranks the equal pair ahead of it, so the
        // survivor among the 500s must still be the smaller id.
        let m = matrix_of(&[&[0, 500, 500, 300, 500]]);
        assert_eq!(find_nearest(&m, 1, 0, 2), vec![4, 2]);
    }

    #[test]
    fn test_k_larger_than_grid() {
        let m = matrix_of(&[&[1, 2], &[3, 4]]);
        assert_eq!(find_nearest(&m, 4, 4, 100), vec![3, 2, 1]);
    }

    #[test]
    fn test_find_nearest_to_cell_unknown_id() {
        let snap = crate::engine::recalculate(matrix_of(&[&[1, 2]]));
        assert!(find_nearest_to_cell(&snap, 99, 3).is_empty());
        assert_eq!(find_nearest_to_cell(&snap, 1, 3), vec![2]);
    }
}
