//! Rating value type.

use serde::{Deserialize, Serialize};

/// Error returned for rating values outside the accepted range.
#[derive(thiserror::Error, Debug, Clone)]
#[error("rating must be an integer between {min} and {max}", min = RatingValue::MIN, max = RatingValue::MAX)]
pub struct RatingValueError;

/// An integer star rating in the range 1..=5.
///
/// The range is enforced at construction and during deserialization, so a
/// `RatingValue` held anywhere in the system is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RatingValue(i64);

impl RatingValue {
    /// Lowest accepted rating.
    pub const MIN: i64 = 1;
    /// Highest accepted rating.
    pub const MAX: i64 = 5;

    /// Create a rating value, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`RatingValueError`] if `value` is outside 1..=5.
    pub const fn new(value: i64) -> Result<Self, RatingValueError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingValueError)
        }
    }

    /// Get the underlying integer value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = RatingValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for i64 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for RatingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        for v in 1..=5 {
            assert_eq!(RatingValue::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for v in [0, 6, -1, 100] {
            assert!(RatingValue::new(v).is_err(), "expected error for {v}");
        }
    }

    #[test]
    fn deserialization_enforces_range() {
        assert!(serde_json::from_str::<RatingValue>("3").is_ok());
        assert!(serde_json::from_str::<RatingValue>("6").is_err());
        assert!(serde_json::from_str::<RatingValue>("0").is_err());
    }
}
