use crate::value::Value;
use std::{cmp::Ordering, mem::discriminant};

///
/// Value comparison semantics
///
/// Defines which runtime value comparisons are permitted and how they
/// behave. This module is schema-agnostic; it operates purely on runtime
/// `Value`s. The only non-strict rule is numeric widening: values of
/// different numeric variants compare by numeric magnitude.
///

/// Perform equality comparison.
///
/// Returns `None` if the comparison is not defined for the given values.
#[must_use]
pub(crate) fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    if same_variant(left, right) {
        return Some(left == right);
    }

    left.cmp_numeric(right).map(|ord| ord == Ordering::Equal)
}

/// Perform ordering comparison.
///
/// Returns `None` if ordering is undefined for the given values.
#[must_use]
pub(crate) fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if same_variant(left, right) {
        return strict_ordering(left, right);
    }

    left.cmp_numeric(right)
}

/// Canonical total ordering for database semantics.
///
/// This is the only ordering used for:
/// - ORDER BY
/// - group keys
#[must_use]
pub(crate) fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    if let Some(ordering) = strict_ordering(left, right) {
        return ordering;
    }

    canonical_rank(left).cmp(&canonical_rank(right))
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Float64(_) => 1,
        Value::Int(_) => 2,
        Value::List(_) => 3,
        Value::Null => 4,
        Value::Text(_) => 5,
        Value::Uint(_) => 6,
    }
}

/// Check whether a value equals any element in a list.
///
/// Returns `None` when no element defines a comparison at all.
#[must_use]
pub(crate) fn in_list(actual: &Value, list: &Value) -> Option<bool> {
    let Value::List(items) = list else {
        return None;
    };

    let mut saw_valid = false;
    for item in items {
        match compare_eq(actual, item) {
            Some(true) => return Some(true),
            Some(false) => saw_valid = true,
            None => {}
        }
    }

    saw_valid.then_some(false)
}

fn same_variant(left: &Value, right: &Value) -> bool {
    discriminant(left) == discriminant(right)
}

/// Strict ordering for identical value variants.
///
/// Returns `None` if values are of different variants
/// or do not support ordering.
fn strict_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
        (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.partial_cmp(b),
        _ => {
            // NOTE: Non-matching or non-orderable variants do not define ordering.
            None
        }
    }
}

///
/// TESTS
///
