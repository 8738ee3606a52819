use crate::{
    db::{
        DbError,
        executor::LoadExecutor,
        query::{Query, validate_field},
    },
    traits::EntityKind,
    types::Float64,
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// Aggregate terminals
///
/// Folds over the materialized row set of a query. Field-targeted folds
/// validate the projection field against the entity model before any row
/// is read; `Null` slots never contribute to numeric folds or extrema.
///

impl<E: EntityKind> LoadExecutor<'_, E> {
    // ======================================================================
    // Cardinality terminals
    // ======================================================================

    pub(crate) fn count(&self, query: &Query<E>) -> Result<u32, DbError> {
        let response = self.execute(query)?;

        Ok(u32::try_from(response.0.len()).unwrap_or(u32::MAX))
    }

    pub(crate) fn exists(&self, query: &Query<E>) -> Result<bool, DbError> {
        Ok(!self.execute(query)?.is_empty())
    }

    // ======================================================================
    // Numeric folds
    // ======================================================================

    /// Sum a numeric field across all matching rows.
    ///
    /// Returns `None` when no row contributes a value.
    pub(crate) fn sum_by(&self, query: &Query<E>, field: &str) -> Result<Option<Float64>, DbError> {
        let values = self.field_values(query, field, true)?;

        let mut sum = 0.0f64;
        let mut contributors = 0u32;
        for value in &values {
            if let Some(x) = value.as_f64() {
                sum += x;
                contributors += 1;
            }
        }

        if contributors == 0 {
            return Ok(None);
        }

        Ok(Float64::try_new(sum))
    }

    /// Average a numeric field across all matching rows.
    ///
    /// Returns `None` when no row contributes a value.
    pub(crate) fn avg_by(&self, query: &Query<E>, field: &str) -> Result<Option<Float64>, DbError> {
        let values = self.field_values(query, field, true)?;

        let mut sum = 0.0f64;
        let mut contributors = 0u32;
        for value in &values {
            if let Some(x) = value.as_f64() {
                sum += x;
                contributors += 1;
            }
        }

        if contributors == 0 {
            return Ok(None);
        }

        Ok(Float64::try_new(sum / f64::from(contributors)))
    }

    // ======================================================================
    // Extrema
    // ======================================================================

    /// Smallest non-null field value under the canonical value ordering.
    pub(crate) fn min_by(&self, query: &Query<E>, field: &str) -> Result<Option<Value>, DbError> {
        self.extremum_by(query, field, Ordering::Less)
    }

    /// Largest non-null field value under the canonical value ordering.
    pub(crate) fn max_by(&self, query: &Query<E>, field: &str) -> Result<Option<Value>, DbError> {
        self.extremum_by(query, field, Ordering::Greater)
    }

    fn extremum_by(
        &self,
        query: &Query<E>,
        field: &str,
        keep: Ordering,
    ) -> Result<Option<Value>, DbError> {
        let values = self.field_values(query, field, false)?;

        let mut best: Option<Value> = None;
        for value in values {
            if value.is_null() {
                continue;
            }

            best = match best {
                Some(current) if canonical_cmp(&value, &current) != keep => Some(current),
                _ => Some(value),
            };
        }

        Ok(best)
    }

    // ======================================================================
    // Value projections
    // ======================================================================

    /// Distinct field values in first-seen order, deduplicated by equality.
    pub(crate) fn distinct_values_by(
        &self,
        query: &Query<E>,
        field: &str,
    ) -> Result<Vec<Value>, DbError> {
        let values = self.field_values(query, field, false)?;

        let mut seen: Vec<Value> = Vec::new();
        for value in values {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }

        Ok(seen)
    }

    /// Row counts grouped by field value, in ascending canonical key order.
    ///
    /// `Null` slots form their own group.
    pub(crate) fn group_count_by(
        &self,
        query: &Query<E>,
        field: &str,
    ) -> Result<Vec<(Value, u32)>, DbError> {
        let values = self.field_values(query, field, false)?;

        let mut groups: Vec<(Value, u32)> = Vec::new();
        for value in values {
            match groups.iter_mut().find(|(key, _)| *key == value) {
                Some((_, n)) => *n += 1,
                None => groups.push((value, 1)),
            }
        }

        groups.sort_by(|(a, _), (b, _)| canonical_cmp(a, b));

        Ok(groups)
    }

    // ======================================================================
    // Shared projection
    // ======================================================================

    /// Materialize the query and project one field per row.
    ///
    /// A slot the entity does not surface reads as `Null`, matching the
    /// ordering pass.
    fn field_values(
        &self,
        query: &Query<E>,
        field: &str,
        require_numeric: bool,
    ) -> Result<Vec<Value>, DbError> {
        validate_field::<E>(field, require_numeric)?;

        let response = self.execute(query)?;

        Ok(response
            .0
            .into_iter()
            .map(|(_, entity)| entity.get_value(field).unwrap_or(Value::Null))
            .collect())
    }
}

///
/// TESTS
///
