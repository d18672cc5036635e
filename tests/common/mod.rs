//! Shared helpers for integration tests.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use matrixgrid::types::{Cell, CellValue, Matrix, MatrixSnapshot};

/// Generator returning the same amount forever.
pub fn constant(v: CellValue) -> impl FnMut() -> CellValue {
    move || v
}

/// Generator that cycles through `values`.
pub fn cycle(values: &[CellValue]) -> impl FnMut() -> CellValue + '_ {
    let mut it = values.iter().copied().cycle();
    move || it.next().unwrap_or(0)
}

/// Build a matrix with row-major ids starting at 1 from literal amounts.
pub fn matrix_of(rows: &[&[CellValue]]) -> Matrix {
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

/// All amounts in row-major order.
pub fn amounts(snapshot: &MatrixSnapshot) -> Vec<CellValue> {
    snapshot.cells().map(|c| c.amount).collect()
}

/// Assert the derived statistics agree with the matrix.
pub fn assert_consistent(snapshot: &MatrixSnapshot) {
    assert_eq!(snapshot.row_sums.len(), snapshot.matrix.len());
    for (row, &sum) in snapshot.matrix.iter().zip(&snapshot.row_sums) {
        let expected: u64 = row.iter().map(|c| u64::from(c.amount)).sum();
        assert_eq!(sum, expected);
    }

    let cols = snapshot.matrix.first().map_or(0, Vec::len);
    assert_eq!(snapshot.column_percentiles.len(), cols);
    for (j, &p) in snapshot.column_percentiles.iter().enumerate() {
        let column: Vec<CellValue> = snapshot.matrix.iter().map(|r| r[j].amount).collect();
        let min = f64::from(*column.iter().min().unwrap());
        let max = f64::from(*column.iter().max().unwrap());
        assert!(
            p >= min && p <= max,
            "column {j} percentile {p} outside [{min}, {max}]"
        );
    }
}
