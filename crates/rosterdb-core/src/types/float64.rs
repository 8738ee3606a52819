use crate::{traits::FieldValue, value::Value};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// The only float shape fields and aggregates carry: finite, with -0.0
/// folded into 0.0 at construction so every value has exactly one bit
/// pattern and equality, hashing, and ordering agree.
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Float64(f64);

impl Float64 {
    /// Gate on NaN and the infinities.
    // adding positive zero canonicalizes a negative zero
    #[must_use]
    pub const fn try_new(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self(value + 0.0))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// one bit pattern per value, so bitwise identity is value identity
impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Float64 {}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

// total_cmp matches the numeric order once NaN and -0.0 are gone
impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FieldValue for Float64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;

        Self::try_new(raw)
            .ok_or_else(|| serde::de::Error::custom(format_args!("non-finite float64: {raw}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as DeError, F64Deserializer};

    #[test]
    fn construction_rejects_non_finite_input() {
        assert!(Float64::try_new(45.0).is_some());

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Float64::try_new(bad).is_none());
        }
    }

    #[test]
    fn negative_zero_collapses_to_positive_zero() {
        let zero = Float64::try_new(-0.0).unwrap();

        assert_eq!(zero.get().to_bits(), 0.0f64.to_bits());
        assert_eq!(zero, Float64::try_new(0.0).unwrap());
    }

    #[test]
    fn ordering_is_plain_numeric_order() {
        let lo = Float64::try_new(10.0).unwrap();
        let hi = Float64::try_new(47.5).unwrap();

        assert!(lo < hi);
        assert_eq!(lo.cmp(&lo), Ordering::Equal);
    }

    #[test]
    fn deserialization_applies_the_same_gate() {
        let value = Float64::deserialize(F64Deserializer::<DeError>::new(-0.0)).unwrap();
        assert_eq!(value.get().to_bits(), 0.0f64.to_bits());

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Float64::deserialize(F64Deserializer::<DeError>::new(bad)).is_err());
        }
    }
}
