//! Clamping of user-entered grid parameters.

/// Largest accepted row or column count.
pub const MAX_DIMENSION: u32 = 100;

/// Parse a dimension typed by the user.
///
/// Empty or non-numeric text reads as 0, negatives as 0, and anything above
/// [`MAX_DIMENSION`] is clamped. Leading digits are honoured (`"12abc"` → 12).
pub fn parse_dimension(text: &str) -> u32 {
    let trimmed = text.trim();
    if trimmed.starts_with('-') {
        return 0;
    }
    let digits: String = trimmed
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // Overflowing input is certainly above the cap.
    digits
        .parse::<u64>()
        .map_or(MAX_DIMENSION, clamp_dimension)
}

/// Clamp a dimension into `[0, MAX_DIMENSION]`.
pub fn clamp_dimension(value: u64) -> u32 {
    u32::try_from(value.min(u64::from(MAX_DIMENSION))).unwrap_or(MAX_DIMENSION)
}

/// Upper bound for the nearest-cell count: every cell except the hovered one.
pub fn max_nearest_count(rows: usize, cols: usize) -> usize {
    rows.saturating_mul(cols).saturating_sub(1)
}

/// Clamp `k` into `[0, rows * cols - 1]`.
pub fn clamp_nearest_count(k: usize, rows: usize, cols: usize) -> usize {
    k.min(max_nearest_count(rows, cols))
}
