//! Pure numeric routines over cells and value lists.
//!
//! Everything here is total: empty input produces zero (or an empty vector),
//! never an error.

use crate::types::{Cell, CellValue, Matrix};

/// Percentile rank used for the per-column summary row.
pub const PERCENTILE_RANK: f64 = 60.0;

/// Percentile with linear interpolation between closest ranks.
///
/// Sorts ascending and takes rank `r = p / 100 * (len - 1)`. When `r` lands
/// on an index that value is returned, otherwise the two neighbours are
/// blended by the fractional part of `r`. `p` is clamped to `[0, 100]`.
pub fn percentile<T>(values: &[T], p: f64) -> f64
where
    T: Copy + Into<f64>,
{
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted: Vec<f64> = values.iter().map(|&v| v.into()).collect();
    sorted.sort_by(f64::total_cmp);

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank_index(rank.floor());
    let upper = rank_index(rank.ceil());

    let lo = sorted.get(lower).copied().unwrap_or(0.0);
    if lower == upper {
        return lo;
    }
    let hi = sorted.get(upper).copied().unwrap_or(lo);
    let weight = rank - rank.floor();
    lo * (1.0 - weight) + hi * weight
}

/// Rank is finite and within `[0, len - 1]` by construction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rank_index(rank: f64) -> usize {
    rank.max(0.0) as usize
}

/// Sum of a row's amounts.
pub fn row_sum(row: &[Cell]) -> u64 {
    row.iter().map(|c| u64::from(c.amount)).sum()
}

/// Amounts of column `col`, top to bottom.
///
/// Rows too short to have that column are skipped.
pub fn column_values(matrix: &Matrix, col: usize) -> Vec<CellValue> {
    matrix
        .iter()
        .filter_map(|row| row.get(col).map(|c| c.amount))
        .collect()
}

/// 60th percentile of every column.
pub fn column_percentiles(matrix: &Matrix) -> Vec<f64> {
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|col| percentile(&column_values(matrix, col), PERCENTILE_RANK))
        .collect()
}

/// Each cell's share of its row sum, in percent.
///
/// A zero-sum row yields zeros rather than NaN.
pub fn row_shares(row: &[Cell]) -> Vec<f64> {
    let sum = row_sum(row);
    if sum == 0 {
        return vec![0.0; row.len()];
    }
    let sum = sum as f64;
    row.iter()
        .map(|c| f64::from(c.amount) / sum * 100.0)
        .collect()
}

/// Heatmap intensity of each cell relative to the row maximum, in `[0, 1]`.
pub fn row_heat(row: &[Cell]) -> Vec<f64> {
    let max = row.iter().map(|c| c.amount).max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; row.len()];
    }
    let max = f64::from(max);
    row.iter().map(|c| f64::from(c.amount) / max).collect()
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
    use test_case::test_case;

    fn row(amounts: &[u32]) -> Vec<Cell> {
        (1..).zip(amounts).map(|(id, &a)| Cell::new(id, a)).collect()
    }

    #[test_case(&[], 60.0, 0.0; "empty is zero")]
    #[test_case(&[5], 60.0, 5.0; "single value")]
    #[test_case(&[1, 2, 3, 4, 5], 60.0, 3.4; "interpolated")]
    #[test_case(&[5, 1, 4, 2, 3], 60.0, 3.4; "unsorted input")]
    #[test_case(&[10, 20, 30], 50.0, 20.0; "exact rank")]
    #[test_case(&[10, 20, 30], 0.0, 10.0; "p0 is min")]
    #[test_case(&[10, 20, 30], 100.0, 30.0; "p100 is max")]
    #[test_case(&[10, 20, 30], 150.0, 30.0; "p above range clamps")]
    fn test_percentile(values: &[u32], p: f64, expected: f64) {
        let got = percentile(values, p);
        assert!(
            (got - expected).abs() < 1e-9,
            "percentile({values:?}, {p}) = {got}, expected {expected}"
        );
    }

    #[test]
    fn test_percentile_accepts_floats() {
        let got = percentile(&[1.5_f64, 2.5], 60.0);
        assert!((got - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_row_sum() {
        assert_eq!(row_sum(&[]), 0);
        assert_eq!(row_sum(&row(&[100, 250, 999])), 1349);
    }

    #[test]
    fn test_row_sum_does_not_overflow_u32() {
        let cells = row(&[u32::MAX, u32::MAX]);
        assert_eq!(row_sum(&cells), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_column_values_skips_short_rows() {
        let matrix = vec![row(&[1, 2]), row(&[3])];
        assert_eq!(column_values(&matrix, 0), vec![1, 3]);
        assert_eq!(column_values(&matrix, 1), vec![2]);
    }

    #[test]
    fn test_column_percentiles_empty() {
        assert!(column_percentiles(&Vec::new()).is_empty());
    }

    #[test]
    fn test_row_shares() {
        let shares = row_shares(&row(&[100, 300]));
        assert!((shares[0] - 25.0).abs() < 1e-9);
        assert!((shares[1] - 75.0).abs() < 1e-9);
        assert_eq!(row_shares(&row(&[0, 0])), vec![0.0, 0.0]);
    }

    #[test]
    fn test_row_heat() {
        let heat = row_heat(&row(&[200, 400, 100]));
        assert_eq!(heat, vec![0.5, 1.0, 0.25]);
        assert!(row_heat(&[]).is_empty());
    }
}
