//! Rating aggregation helpers.
//!
//! Averages are recomputed on read, never stored. A store with no ratings
//! reports its average as absent ("unavailable"), not zero, so clients never
//! render a misleading 0/5.

/// Round a value to 2 decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round an optional raw average to 2 decimal places.
///
/// `None` (no ratings) stays `None`.
#[must_use]
pub fn round_average(average: Option<f64>) -> Option<f64> {
    average.map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert!((round2(3.333_333) - 3.33).abs() < f64::EPSILON);
        assert!((round2(4.666_666) - 4.67).abs() < f64::EPSILON);
        assert!((round2(2.5) - 2.5).abs() < f64::EPSILON);
        assert!((round2(5.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_of_mixed_values() {
        // (1 + 4 + 5) / 3 = 3.3333... -> 3.33
        let raw = f64::from(1 + 4 + 5) / 3.0;
        assert!((round2(raw) - 3.33).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_ratings_is_unavailable_not_zero() {
        assert_eq!(round_average(None), None);
    }

    #[test]
    fn present_average_survives_rounding() {
        assert_eq!(round_average(Some(3.875)), Some(3.88));
    }
}
