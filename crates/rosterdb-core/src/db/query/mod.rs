mod fluent;

pub use fluent::LoadQuery;

use crate::{
    db::filter::{Cmp, FilterExpr},
    model::EntityModel,
    traits::EntityKind,
};
use std::marker::PhantomData;
use thiserror::Error as ThisError;

///
/// Query
///
/// Typed, declarative query intent for a specific entity type.
///
/// This intent is:
/// - schema-agnostic at construction
/// - validated against the entity model only at execution
///
/// An unfiltered query is represented by an absent filter,
/// not an empty conjunction.
///

#[derive(Clone, Debug)]
pub struct Query<E: EntityKind> {
    pub(crate) filter: Option<FilterExpr>,
    pub(crate) order: Vec<(String, OrderDirection)>,
    pub(crate) page: Page,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> Query<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter: None,
            order: Vec::new(),
            page: Page::unbounded(),
            _marker: PhantomData,
        }
    }

    /// Add a filter, implicitly AND-ing with any existing filter.
    #[must_use]
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filter = match self.filter.take() {
            Some(existing) => Some(existing.and(expr)),
            None => Some(expr),
        };
        self
    }

    /// Add a filter only when one is supplied.
    #[must_use]
    pub fn filter_opt(self, expr: Option<FilterExpr>) -> Self {
        match expr {
            Some(expr) => self.filter(expr),
            None => self,
        }
    }

    /// Add a filter, implicitly OR-ing with any existing filter.
    #[must_use]
    pub fn or_filter(mut self, expr: FilterExpr) -> Self {
        self.filter = match self.filter.take() {
            Some(existing) => Some(existing.or(expr)),
            None => Some(expr),
        };
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order.push((field.into(), OrderDirection::Asc));
        self
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order.push((field.into(), OrderDirection::Desc));
        self
    }

    /// Skip a number of rows in the ordered result stream.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.page.offset = offset;
        self
    }

    /// Bound the number of returned rows.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.page.limit = Some(limit);
        self
    }
}

impl<E: EntityKind> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// OrderDirection
/// Ordering direction for one sort key (applied after filtering).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

///
/// Page
/// Pagination window applied after ordering.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page {
    pub offset: u32,
    pub limit: Option<u32>,
}

impl Page {
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            offset: 0,
            limit: None,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::unbounded()
    }
}

///
/// QueryError
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("unknown field '{field}' (entity {entity})")]
    UnknownField {
        entity: &'static str,
        field: String,
    },

    #[error("operator '{cmp}' requires a text field, got '{field}' (entity {entity})")]
    TextOperator {
        entity: &'static str,
        field: String,
        cmp: Cmp,
    },

    #[error("field '{field}' is not numeric (entity {entity})")]
    NotNumeric {
        entity: &'static str,
        field: String,
    },
}

/// Validate a query intent against the entity model.
///
/// Checks every filter clause field and every order key before
/// any row is read.
pub(crate) fn validate<E: EntityKind>(query: &Query<E>) -> Result<(), QueryError> {
    if let Some(filter) = &query.filter {
        validate_expr(E::MODEL, E::ENTITY_NAME, filter)?;
    }

    for (field, _) in &query.order {
        if E::MODEL.field(field).is_none() {
            return Err(QueryError::UnknownField {
                entity: E::ENTITY_NAME,
                field: field.clone(),
            });
        }
    }

    Ok(())
}

/// Validate one aggregate projection field against the entity model.
pub(crate) fn validate_field<E: EntityKind>(
    field: &str,
    require_numeric: bool,
) -> Result<(), QueryError> {
    let Some(model_field) = E::MODEL.field(field) else {
        return Err(QueryError::UnknownField {
            entity: E::ENTITY_NAME,
            field: field.to_string(),
        });
    };

    if require_numeric && !model_field.kind.is_numeric() {
        return Err(QueryError::NotNumeric {
            entity: E::ENTITY_NAME,
            field: field.to_string(),
        });
    }

    Ok(())
}

fn validate_expr(
    model: &EntityModel,
    entity: &'static str,
    expr: &FilterExpr,
) -> Result<(), QueryError> {
    match expr {
        FilterExpr::True | FilterExpr::False => Ok(()),

        FilterExpr::And(children) | FilterExpr::Or(children) => {
            for child in children {
                validate_expr(model, entity, child)?;
            }
            Ok(())
        }

        FilterExpr::Not(inner) => validate_expr(model, entity, inner),

        FilterExpr::Clause(clause) => {
            let Some(field) = model.field(&clause.field) else {
                return Err(QueryError::UnknownField {
                    entity,
                    field: clause.field.clone(),
                });
            };

            if clause.cmp.is_text() && !field.kind.is_text() {
                return Err(QueryError::TextOperator {
                    entity,
                    field: clause.field.clone(),
                    cmp: clause.cmp,
                });
            }

            Ok(())
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRecord;

    #[test]
    fn filter_and_merges() {
        let query = Query::<TestRecord>::new()
            .filter(FilterExpr::eq("name", "a"))
            .filter(FilterExpr::eq("points", 1));

        match query.filter {
            Some(FilterExpr::And(children)) => assert_eq!(children.len(), 2),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn filter_opt_none_is_identity() {
        let query = Query::<TestRecord>::new().filter_opt(None);
        assert!(query.filter.is_none());
    }

    #[test]
    fn or_filter_merges_with_or() {
        let query = Query::<TestRecord>::new()
            .filter(FilterExpr::eq("name", "a"))
            .or_filter(FilterExpr::eq("name", "b"));

        assert!(matches!(query.filter, Some(FilterExpr::Or(_))));
    }

    #[test]
    fn or_filter_on_empty_query_sets_filter() {
        let query = Query::<TestRecord>::new().or_filter(FilterExpr::eq("name", "a"));
        assert!(matches!(query.filter, Some(FilterExpr::Clause(_))));
    }

    #[test]
    fn order_and_page_accumulate() {
        let query = Query::<TestRecord>::new()
            .order_by("name")
            .order_by_desc("points")
            .offset(3)
            .limit(5);

        assert_eq!(query.order.len(), 2);
        assert_eq!(query.order[1].1, OrderDirection::Desc);
        assert_eq!(query.page.offset, 3);
        assert_eq!(query.page.limit, Some(5));
    }

    #[test]
    fn validate_accepts_declared_fields() {
        let query = Query::<TestRecord>::new()
            .filter(FilterExpr::eq("name", "a").and(FilterExpr::gt("points", 0)))
            .order_by("points");

        assert!(validate(&query).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_filter_field() {
        let query = Query::<TestRecord>::new().filter(FilterExpr::eq("nope", 1));
        let err = validate(&query).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn validate_rejects_unknown_order_field() {
        let query = Query::<TestRecord>::new().order_by("nope");
        let err = validate(&query).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn validate_rejects_text_operator_on_numeric_field() {
        let query = Query::<TestRecord>::new().filter(FilterExpr::contains("points", "4"));
        let err = validate(&query).unwrap_err();
        assert!(matches!(err, QueryError::TextOperator { .. }));
    }

    #[test]
    fn validate_descends_into_composites() {
        let query = Query::<TestRecord>::new()
            .filter(!(FilterExpr::eq("name", "a") | FilterExpr::eq("ghost", 1)));
        let err = validate(&query).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn validate_field_checks_numeric_requirement() {
        assert!(validate_field::<TestRecord>("points", true).is_ok());
        assert!(validate_field::<TestRecord>("ratio", true).is_ok());

        let err = validate_field::<TestRecord>("name", true).unwrap_err();
        assert!(matches!(err, QueryError::NotNumeric { .. }));

        assert!(validate_field::<TestRecord>("name", false).is_ok());
    }
}
