//! Two-decimal rounding for consensus values.
//!
//! Consensus values are exact ratios of integers, so they are rounded as
//! ratios: a value whose third decimal is exactly 5 is a real tie, and the
//! configured [`RoundingMode`] decides it.

use serde::{Deserialize, Serialize};

/// How exact ties are resolved when rounding to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties go to the even hundredth (0.025 → 0.02, 0.035 → 0.04).
    #[default]
    HalfEven,
    /// Ties go up (0.025 → 0.03).
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Round `numerator / denominator` to the nearest integer.
    ///
    /// `denominator` must be non-zero.
    pub fn round_ratio(self, numerator: u64, denominator: u64) -> u64 {
        let quotient = numerator / denominator;
        let twice_remainder = 2 * (numerator % denominator);
        if twice_remainder < denominator {
            quotient
        } else if twice_remainder > denominator {
            quotient + 1
        } else {
            match self {
                Self::HalfEven if quotient % 2 == 0 => quotient,
                Self::HalfEven => quotient + 1,
                Self::HalfAwayFromZero => quotient + 1,
            }
        }
    }

    /// Round a value given in hundredths as `numerator / denominator` and
    /// return it as a decimal.
    pub fn hundredths(self, numerator: u64, denominator: u64) -> f64 {
        self.round_ratio(numerator, denominator) as f64 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_values_pass_through() {
        assert_eq!(RoundingMode::HalfEven.round_ratio(120, 2), 60);
        assert_eq!(RoundingMode::HalfAwayFromZero.round_ratio(120, 2), 60);
    }

    #[test]
    fn non_ties_round_to_nearest() {
        // 100 / 3 = 33.33..
        assert_eq!(RoundingMode::HalfEven.round_ratio(100, 3), 33);
        // 200 / 3 = 66.66..
        assert_eq!(RoundingMode::HalfEven.round_ratio(200, 3), 67);
        assert_eq!(RoundingMode::HalfAwayFromZero.round_ratio(200, 3), 67);
    }

    #[test]
    fn ties_follow_mode() {
        // 2.5
        assert_eq!(RoundingMode::HalfEven.round_ratio(10, 4), 2);
        assert_eq!(RoundingMode::HalfAwayFromZero.round_ratio(10, 4), 3);
        // 3.5
        assert_eq!(RoundingMode::HalfEven.round_ratio(14, 4), 4);
        assert_eq!(RoundingMode::HalfAwayFromZero.round_ratio(14, 4), 4);
    }

    #[test]
    fn hundredths_as_decimal() {
        assert_eq!(RoundingMode::HalfEven.hundredths(120, 2), 0.6);
        assert_eq!(RoundingMode::HalfEven.hundredths(0, 7), 0.0);
        assert_eq!(RoundingMode::HalfEven.hundredths(700, 7), 1.0);
    }

    #[test]
    fn yaml_names() {
        let mode: RoundingMode = serde_yaml::from_str("half_away_from_zero").unwrap();
        assert_eq!(mode, RoundingMode::HalfAwayFromZero);
        assert_eq!(
            serde_yaml::to_string(&RoundingMode::HalfEven).unwrap().trim(),
            "half_even"
        );
    }
}
