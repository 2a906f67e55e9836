//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the u32 range, returning 0 for NaN and negative values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).round();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Relative error of `actual` against `expected`, in percent.
///
/// The denominator is `|expected|` floored at `floor`, so a zero expectation
/// never divides by zero when `floor` is positive.
#[must_use]
pub fn relative_error_pct(expected: f64, actual: f64, floor: f64) -> f64 {
    let denominator = expected.abs().max(floor);
    if denominator == 0.0 {
        return 0.0;
    }
    (actual - expected).abs() / denominator * 100.0
}

/// Percentage of `part` within `total`, 0 when `total` is zero.
#[must_use]
pub fn share_pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    usize_to_f64(part) / usize_to_f64(total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_u32(1.6), 2);
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(-12.0), 0);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn relative_error_respects_floor() {
        assert!((relative_error_pct(100.0, 110.0, 1.0) - 10.0).abs() < 1e-9);
        assert!((relative_error_pct(0.0, 3.0, 1.0) - 300.0).abs() < 1e-9);
        assert!(relative_error_pct(0.0, 3.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn share_handles_empty_total() {
        assert!(share_pct(3, 0).abs() < f64::EPSILON);
        assert!((share_pct(1, 4) - 25.0).abs() < f64::EPSILON);
    }
}
