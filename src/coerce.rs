//! Silent-default coercion — every numeric correction the pipeline makes is
//! expressed as a [`Coerced`] value so callers and tests can see what happened.

/// Neutral value for unit-range fields (energy, novelty).
pub const NEUTRAL_UNIT: f64 = 0.5;

/// Popularity assumed for songs that don't report one.
pub const DEFAULT_POPULARITY: f64 = 50.0;

/// Upper bound of the popularity scale.
pub const MAX_POPULARITY: f64 = 100.0;

/// A value that went through a normalization pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    /// Usable as supplied.
    Given(T),
    /// Outside its range; forced to the nearest bound.
    Clamped(T),
    /// Missing or unusable; the default was substituted.
    Defaulted(T),
}

impl<T> Coerced<T> {
    /// The resulting value, whatever happened to it.
    pub fn value(self) -> T {
        match self {
            Self::Given(v) | Self::Clamped(v) | Self::Defaulted(v) => v,
        }
    }

    /// Whether the input was used unchanged.
    pub fn is_given(&self) -> bool {
        matches!(self, Self::Given(_))
    }

    /// Whether the input was replaced or altered.
    pub fn was_corrected(&self) -> bool {
        !self.is_given()
    }

    /// Transform the value, keeping how it was obtained.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Coerced<U> {
        match self {
            Self::Given(v) => Coerced::Given(f(v)),
            Self::Clamped(v) => Coerced::Clamped(f(v)),
            Self::Defaulted(v) => Coerced::Defaulted(f(v)),
        }
    }
}

/// Force a value into `[min, max]`. NaN and missing values become `default`.
pub fn clamp_or(value: Option<f64>, min: f64, max: f64, default: f64) -> Coerced<f64> {
    match value {
        None => Coerced::Defaulted(default),
        Some(v) if v.is_nan() => Coerced::Defaulted(default),
        Some(v) if v < min => Coerced::Clamped(min),
        Some(v) if v > max => Coerced::Clamped(max),
        Some(v) => Coerced::Given(v),
    }
}

/// Coerce into `[0, 1]`, defaulting to [`NEUTRAL_UNIT`].
pub fn unit(value: Option<f64>) -> Coerced<f64> {
    clamp_or(value, 0.0, 1.0, NEUTRAL_UNIT)
}

/// Coerce a popularity figure into `[0, 100]`, defaulting to [`DEFAULT_POPULARITY`].
pub fn popularity(value: Option<f64>) -> Coerced<f64> {
    clamp_or(value, 0.0, MAX_POPULARITY, DEFAULT_POPULARITY)
}

/// Coerce a caller-supplied limit. Missing or non-positive limits fall back to `default`.
pub fn positive_limit(value: Option<i64>, default: usize) -> Coerced<usize> {
    match value {
        None => Coerced::Defaulted(default),
        Some(v) if v <= 0 => Coerced::Defaulted(default),
        Some(v) => Coerced::Given(usize::try_from(v).unwrap_or(usize::MAX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_passes_in_range_values() {
        assert_eq!(unit(Some(0.3)), Coerced::Given(0.3));
        assert_eq!(unit(Some(0.0)), Coerced::Given(0.0));
        assert_eq!(unit(Some(1.0)), Coerced::Given(1.0));
    }

    #[test]
    fn unit_clamps_out_of_range() {
        assert_eq!(unit(Some(1.7)), Coerced::Clamped(1.0));
        assert_eq!(unit(Some(-0.2)), Coerced::Clamped(0.0));
        assert_eq!(unit(Some(f64::INFINITY)), Coerced::Clamped(1.0));
    }

    #[test]
    fn unit_defaults_missing_and_nan() {
        assert_eq!(unit(None), Coerced::Defaulted(0.5));
        assert_eq!(unit(Some(f64::NAN)), Coerced::Defaulted(0.5));
    }

    #[test]
    fn popularity_defaults_to_fifty() {
        assert_eq!(popularity(None), Coerced::Defaulted(50.0));
        assert_eq!(popularity(Some(140.0)), Coerced::Clamped(100.0));
        assert_eq!(popularity(Some(72.0)), Coerced::Given(72.0));
    }

    #[test]
    fn positive_limit_rejects_zero_and_negative() {
        assert_eq!(positive_limit(Some(0), 50), Coerced::Defaulted(50));
        assert_eq!(positive_limit(Some(-3), 2), Coerced::Defaulted(2));
        assert_eq!(positive_limit(None, 2), Coerced::Defaulted(2));
        assert_eq!(positive_limit(Some(10), 50), Coerced::Given(10));
    }

    #[test]
    fn value_and_map() {
        let c = Coerced::Clamped(1.0_f64).map(|v| v * 2.0);
        assert_eq!(c, Coerced::Clamped(2.0));
        assert!(c.was_corrected());
        assert_eq!(c.value(), 2.0);
        assert!(Coerced::Given(1).is_given());
    }
}
