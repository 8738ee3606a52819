use crate::{
    db::filter::{Cmp, FilterClause, FilterExpr},
    traits::FieldValues,
    value::{Value, compare_eq, compare_order, in_list},
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during filter
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FieldPresence {
    /// Field exists and has a value (including `Value::Null`).
    Present(Value),
    /// Field is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples filter evaluation from concrete entity types.
///

pub(crate) trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

///
/// Default `Row` implementation for any type that exposes
/// `FieldValues`, which is the standard runtime entity interface.
///

impl<T: FieldValues> Row for T {
    fn field(&self, name: &str) -> FieldPresence {
        match self.get_value(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }
}

///
/// Evaluate a filter expression against a single row.
///
/// This function performs **pure runtime evaluation**:
/// - no schema access
/// - no validation
///
/// Any undefined comparison simply evaluates to `false`.
/// CONTRACT: internal-only; expressions must be validated before evaluation.
///
#[must_use]
pub(crate) fn eval<R: Row + ?Sized>(row: &R, expr: &FilterExpr) -> bool {
    match expr {
        FilterExpr::True => true,
        FilterExpr::False => false,

        FilterExpr::And(children) => children.iter().all(|child| eval(row, child)),
        FilterExpr::Or(children) => children.iter().any(|child| eval(row, child)),
        FilterExpr::Not(inner) => !eval(row, inner),

        FilterExpr::Clause(clause) => eval_clause(row, clause),
    }
}

///
/// Evaluate a single clause against a row.
///
/// Returns `false` if:
/// - the field is missing
/// - the comparison is not defined for the operand types
///
fn eval_clause<R: Row + ?Sized>(row: &R, clause: &FilterClause) -> bool {
    let FilterClause { field, cmp, value } = clause;

    match cmp {
        // Presence checks inspect the field slot itself. A field holding
        // `Null` is an absent optional, not a missing field.
        Cmp::IsNone => matches!(row.field(field), FieldPresence::Present(Value::Null)),
        Cmp::IsSome => match row.field(field) {
            FieldPresence::Present(actual) => !actual.is_null(),
            FieldPresence::Missing => false,
        },

        _ => {
            let FieldPresence::Present(actual) = row.field(field) else {
                return false;
            };

            eval_compare(&actual, *cmp, value)
        }
    }
}

// NOTE: Comparison helpers return None when a comparison is undefined; eval treats that as a non-match.
fn eval_compare(actual: &Value, cmp: Cmp, value: &Value) -> bool {
    match cmp {
        Cmp::Eq => compare_eq(actual, value).unwrap_or(false),
        Cmp::Ne => compare_eq(actual, value).is_some_and(|v| !v),

        Cmp::Lt => compare_order(actual, value).is_some_and(Ordering::is_lt),
        Cmp::Lte => compare_order(actual, value).is_some_and(Ordering::is_le),
        Cmp::Gt => compare_order(actual, value).is_some_and(Ordering::is_gt),
        Cmp::Gte => compare_order(actual, value).is_some_and(Ordering::is_ge),

        Cmp::In => in_list(actual, value).unwrap_or(false),
        Cmp::NotIn => in_list(actual, value).is_some_and(|matched| !matched),

        Cmp::Contains => actual.text_contains(value).unwrap_or(false),
        Cmp::StartsWith => actual.text_starts_with(value).unwrap_or(false),
        Cmp::EndsWith => actual.text_ends_with(value).unwrap_or(false),

        // handled in eval_clause before a field value is required
        Cmp::IsNone | Cmp::IsSome => false,
    }
}

///
/// TESTS
///
