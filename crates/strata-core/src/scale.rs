//! Ordinal/numeric scale parsing for administrative inputs.
//!
//! Regulatory and redundancy levels arrive either as numbers (`"3"`,
//! `"2.5"`) or as ordinal labels (`"High"`). Both are mapped onto one
//! numeric scale. Malformed values never reject a request; they fall back
//! to `0.0`.

/// Parse a scale value from a number or an ordinal label.
///
/// `low` = 1, `medium` = 2, `high` = 3, `critical` = 4 (case-insensitive).
/// Negative, non-finite, or unrecognised input yields `0.0`.
#[must_use]
pub fn parse_scale(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return if value.is_finite() && value >= 0.0 {
            value
        } else {
            0.0
        };
    }
    match trimmed.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
        "low" => 1.0,
        "medium" | "moderate" => 2.0,
        "high" => 3.0,
        "critical" | "very_high" => 4.0,
        _ => 0.0,
    }
}
