mod compare;

pub(crate) use compare::{canonical_cmp, compare_eq, compare_order, in_list};

use crate::types::Float64;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// CONSTANTS
///

const F64_SAFE_I64: i64 = 1i64 << 53;
const F64_SAFE_U64: u64 = 1u64 << 53;

///
/// Value
///
/// Runtime representation of a single field value. Entities expose their
/// fields as `Value`s for filtering, ordering, and aggregation; filter
/// literals are carried as `Value`s inside clauses. `List` appears only as
/// a filter literal (membership sets), never as a stored field.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Float64(Float64),
    Int(i64),
    List(Vec<Value>),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Float64(_) | Self::Int(_) | Self::Uint(_))
    }

    /// Widen any numeric value to `f64`. Used by sum/avg folds, which
    /// tolerate precision loss on integers past 2^53.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(f.get()),
            Self::Int(i) => Some(*i as f64),
            Self::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    // it's lossless, trust me bro
    #[expect(clippy::cast_precision_loss)]
    fn to_f64_lossless(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(f.get()),
            Self::Int(i) if (-F64_SAFE_I64..=F64_SAFE_I64).contains(i) => Some(*i as f64),
            Self::Uint(u) if *u <= F64_SAFE_U64 => Some(*u as f64),

            _ => None,
        }
    }

    /// Cross-type numeric comparison; returns None if non-numeric.
    #[must_use]
    pub fn cmp_numeric(&self, other: &Self) -> Option<Ordering> {
        if !self.is_numeric() || !other.is_numeric() {
            return None;
        }

        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Uint(b)) => Some(cmp_int_uint(*a, *b)),
            (Self::Uint(a), Self::Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
            _ => {
                let a = self.to_f64_lossless()?;
                let b = other.to_f64_lossless()?;
                a.partial_cmp(&b)
            }
        }
    }

    ///
    /// TEXT COMPARISON
    ///

    fn text_op(&self, other: &Self, f: impl Fn(&str, &str) -> bool) -> Option<bool> {
        let (a, b) = (self.as_text()?, other.as_text()?);
        Some(f(a, b))
    }

    #[must_use]
    /// Check whether `needle` is a substring of `self`.
    pub fn text_contains(&self, needle: &Self) -> Option<bool> {
        self.text_op(needle, |a, b| a.contains(b))
    }

    #[must_use]
    /// Check whether `self` starts with `needle`.
    pub fn text_starts_with(&self, needle: &Self) -> Option<bool> {
        self.text_op(needle, |a, b| a.starts_with(b))
    }

    #[must_use]
    /// Check whether `self` ends with `needle`.
    pub fn text_ends_with(&self, needle: &Self) -> Option<bool> {
        self.text_op(needle, |a, b| a.ends_with(b))
    }
}

/// Exact signed-vs-unsigned ordering without widening through floats.
#[expect(clippy::cast_sign_loss)]
fn cmp_int_uint(i: i64, u: u64) -> Ordering {
    if i < 0 {
        Ordering::Less
    } else {
        (i as u64).cmp(&u)
    }
}
