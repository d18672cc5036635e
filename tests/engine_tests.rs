//! Matrix engine tests
//!
//! Generation, increment, row add/remove and the statistics recomputed
//! after each of them.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{amounts, assert_consistent, constant, cycle, matrix_of};
use matrixgrid::engine::{self, SeededAmounts, AMOUNT_MAX, AMOUNT_MIN};
use matrixgrid::stats::{percentile, PERCENTILE_RANK};
use matrixgrid::types::{Cell, MatrixSnapshot};

// =============================================================================
// GENERATION
// =============================================================================

#[test]
fn test_generate_dimensions() {
    for (rows, cols) in [(1, 1), (1, 7), (7, 1), (10, 10), (100, 100)] {
        let snap = engine::generate(rows, cols, constant(100));
        assert_eq!(snap.row_count(), rows);
        assert_eq!(snap.col_count(), cols);
        assert_eq!(snap.row_sums.len(), rows);
        assert_eq!(snap.column_percentiles.len(), cols);
        assert_eq!(snap.cell_count(), rows * cols);
    }
}

#[test]
fn test_generate_zero_dimension_is_empty() {
    for (rows, cols) in [(0, 0), (0, 10), (10, 0)] {
        let snap = engine::generate(rows, cols, constant(100));
        assert_eq!(snap, MatrixSnapshot::empty());
    }
}

#[test]
fn test_generate_ids_unique_and_sequential() {
    let snap = engine::generate(13, 7, constant(1));
    let ids: Vec<_> = snap.cells().map(|c| c.id).collect();
    let expected: Vec<u32> = (1..=91).collect();
    assert_eq!(ids, expected);
    assert_eq!(snap.max_id(), Some(91));
}

#[test]
fn test_generate_uses_injected_generator_row_major() {
    let snap = engine::generate(2, 3, cycle(&[1, 2, 3, 4, 5, 6]));
    assert_eq!(amounts(&snap), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(snap.row_sums, vec![6, 15]);
    // two values per column: rank 0.6
    assert!((snap.column_percentiles[0] - 2.8).abs() < 1e-9);
    assert!((snap.column_percentiles[2] - 4.8).abs() < 1e-9);
}

#[test]
fn test_generate_with_seeded_amounts_in_range() {
    let mut rng = SeededAmounts::new(99);
    let snap = engine::generate(20, 20, || rng.next_amount());
    assert!(snap
        .cells()
        .all(|c| (AMOUNT_MIN..=AMOUNT_MAX).contains(&c.amount)));
    assert_consistent(&snap);
}

#[test]
fn test_generate_with_production_generator() {
    let snap = engine::generate(10, 10, engine::random_amount);
    assert!(snap
        .cells()
        .all(|c| (AMOUNT_MIN..=AMOUNT_MAX).contains(&c.amount)));
    assert_consistent(&snap);
}

// =============================================================================
// RECALCULATION
// =============================================================================

#[test]
fn test_recalculate_matches_column_percentiles() {
    let matrix = matrix_of(&[&[5, 100], &[1, 200], &[4, 300], &[2, 400], &[3, 500]]);
    let snap = engine::recalculate(matrix);
    assert!((snap.column_percentiles[0] - 3.4).abs() < 1e-9);
    assert!((snap.column_percentiles[1] - 340.0).abs() < 1e-9);
    assert_eq!(snap.row_sums, vec![105, 201, 304, 402, 503]);
}

#[test]
fn test_recalculate_is_deterministic() {
    let matrix = matrix_of(&[&[9, 8, 7], &[6, 5, 4]]);
    assert_eq!(
        engine::recalculate(matrix.clone()),
        engine::recalculate(matrix)
    );
}

#[test]
fn test_percentile_constant_column() {
    let values = [700u32; 9];
    assert_eq!(percentile(&values, PERCENTILE_RANK), 700.0);
}

// =============================================================================
// MUTATIONS
// =============================================================================

#[test]
fn test_end_to_end_two_by_two() {
    let snap = engine::generate(2, 2, constant(100));
    assert_eq!(
        snap.matrix,
        vec![
            vec![Cell::new(1, 100), Cell::new(2, 100)],
            vec![Cell::new(3, 100), Cell::new(4, 100)],
        ]
    );
    assert_eq!(snap.row_sums, vec![200, 200]);
    assert_eq!(snap.column_percentiles, vec![100.0, 100.0]);

    let snap = engine::increment_cell(&snap, 1);
    assert_eq!(snap.matrix[0][0].amount, 101);
    assert_eq!(snap.row_sums, vec![201, 200]);
    assert_consistent(&snap);
}

#[test]
fn test_increment_changes_exactly_one_cell() {
    let before = engine::generate(6, 6, cycle(&[100, 450, 999, 321]));
    let after = engine::increment_cell(&before, 17);

    let changed: Vec<_> = before
        .cells()
        .zip(after.cells())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(changed.len(), 1);
    let (old, new) = changed[0];
    assert_eq!(old.id, 17);
    assert_eq!(new.amount, old.amount + 1);
    assert_consistent(&after);
}

#[test]
fn test_repeated_increments_accumulate() {
    let mut snap = engine::generate(1, 1, constant(500));
    for _ in 0..25 {
        snap = engine::increment_cell(&snap, 1);
    }
    assert_eq!(snap.row_sums, vec![525]);
    assert_eq!(snap.column_percentiles, vec![525.0]);
}

#[test]
fn test_add_then_remove_restores_matrix() {
    let start = engine::generate(4, 5, cycle(&[100, 200, 300]));
    let added = engine::add_row(&start, 5, constant(999));
    assert_eq!(added.row_count(), 5);
    assert_consistent(&added);

    let restored = engine::remove_row(&added, 4);
    assert_eq!(restored, start);
}

#[test]
fn test_remove_row_keeps_remaining_ids() {
    let snap = engine::generate(3, 3, constant(100));
    let snap = engine::remove_row(&snap, 0);
    let ids: Vec<_> = snap.cells().map(|c| c.id).collect();
    assert_eq!(ids, vec![4, 5, 6, 7, 8, 9]);
    assert_consistent(&snap);
}

#[test]
fn test_remove_every_row() {
    let mut snap = engine::generate(3, 2, constant(100));
    while !snap.is_empty() {
        snap = engine::remove_row(&snap, 0);
    }
    assert!(snap.row_sums.is_empty());
    assert!(snap.column_percentiles.is_empty());
}

#[test]
fn test_ids_never_reused_across_mutations() {
    let snap = engine::generate(2, 2, constant(100));
    let snap = engine::remove_row(&snap, 1);
    let snap = engine::add_row(&snap, 2, constant(100));
    let snap = engine::remove_row(&snap, 0);
    let snap = engine::add_row(&snap, 2, constant(100));
    let ids: Vec<_> = snap.cells().map(|c| c.id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let snap = engine::generate(1, 2, constant(150));
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["rowSums"], serde_json::json!([300]));
    assert_eq!(json["columnPercentiles"], serde_json::json!([150.0, 150.0]));
    assert_eq!(json["matrix"][0][1]["id"], 2);

    let back: MatrixSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}
