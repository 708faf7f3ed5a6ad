//! Decimal rounding of binary floats.

/// Round `value` to `places` decimal places.
///
/// Rounds the exact binary value with ties to even, so the product
/// `1.05 × 0.5 × 0.85` (stored just below `0.44625`) becomes `0.4462`.
/// Scaling by a power of ten before rounding would add a second rounding
/// step and can land on the other side of the tie.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}
