//! Module: query::fluent
//! Responsibility: fluent load-query builder and execution routing.
//! Does not own: row-level filter evaluation or store access.
//! Boundary: session API facade over query intent and execution.

use crate::{
    db::{
        Db, DbError,
        executor::LoadExecutor,
        filter::FilterExpr,
        query::Query,
        response::{Response, Row},
    },
    traits::EntityKind,
    types::Float64,
    value::Value,
};

///
/// LoadQuery
///
/// Database-bound load query wrapper.
/// Owns intent construction and execution routing only.
/// All result inspection and projection is performed on `Response<E>`.
///

pub struct LoadQuery<'a, E: EntityKind> {
    db: &'a Db,
    query: Query<E>,
}

impl<'a, E: EntityKind> LoadQuery<'a, E> {
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self {
            db,
            query: Query::new(),
        }
    }

    // ------------------------------------------------------------------
    // Intent inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn query(&self) -> &Query<E> {
        &self.query
    }

    fn map_query(mut self, map: impl FnOnce(Query<E>) -> Query<E>) -> Self {
        self.query = map(self.query);
        self
    }

    // ------------------------------------------------------------------
    // Intent builders (pure)
    // ------------------------------------------------------------------

    /// Add a filter, implicitly AND-ing with any existing filter.
    #[must_use]
    pub fn filter(self, expr: FilterExpr) -> Self {
        self.map_query(|query| query.filter(expr))
    }

    /// Add a filter only when one is supplied.
    #[must_use]
    pub fn filter_opt(self, expr: Option<FilterExpr>) -> Self {
        self.map_query(|query| query.filter_opt(expr))
    }

    /// Add a filter, implicitly OR-ing with any existing filter.
    #[must_use]
    pub fn or_filter(self, expr: FilterExpr) -> Self {
        self.map_query(|query| query.or_filter(expr))
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.map_query(|query| query.order_by(field))
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.map_query(|query| query.order_by_desc(field))
    }

    /// Skip a number of rows in the ordered result stream.
    #[must_use]
    pub fn offset(self, offset: u32) -> Self {
        self.map_query(|query| query.offset(offset))
    }

    /// Bound the number of returned rows.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.map_query(|query| query.limit(limit))
    }

    // ------------------------------------------------------------------
    // Execution terminals
    // ------------------------------------------------------------------

    pub fn execute(&self) -> Result<Response<E>, DbError> {
        self.executor().execute(&self.query)
    }

    /// Execute and project the entities, dropping ids.
    pub fn entities(&self) -> Result<Vec<E>, DbError> {
        Ok(self.execute()?.entities())
    }

    /// Execute expecting exactly one row.
    pub fn one(&self) -> Result<Row<E>, DbError> {
        Ok(self.execute()?.one()?)
    }

    /// Execute expecting at most one row.
    pub fn one_opt(&self) -> Result<Option<Row<E>>, DbError> {
        Ok(self.execute()?.one_opt()?)
    }

    /// Execute and take the first row, if any.
    ///
    /// NOTE: Bypasses cardinality checks. Prefer `one`/`one_opt` unless
    /// intentional.
    pub fn first(&self) -> Result<Option<Row<E>>, DbError> {
        Ok(self.execute()?.first())
    }

    // ------------------------------------------------------------------
    // Aggregate terminals
    // ------------------------------------------------------------------

    pub fn count(&self) -> Result<u32, DbError> {
        self.executor().count(&self.query)
    }

    pub fn exists(&self) -> Result<bool, DbError> {
        self.executor().exists(&self.query)
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(!self.exists()?)
    }

    pub fn sum_by(&self, field: impl AsRef<str>) -> Result<Option<Float64>, DbError> {
        self.executor().sum_by(&self.query, field.as_ref())
    }

    pub fn avg_by(&self, field: impl AsRef<str>) -> Result<Option<Float64>, DbError> {
        self.executor().avg_by(&self.query, field.as_ref())
    }

    pub fn min_by(&self, field: impl AsRef<str>) -> Result<Option<Value>, DbError> {
        self.executor().min_by(&self.query, field.as_ref())
    }

    pub fn max_by(&self, field: impl AsRef<str>) -> Result<Option<Value>, DbError> {
        self.executor().max_by(&self.query, field.as_ref())
    }

    pub fn distinct_values_by(&self, field: impl AsRef<str>) -> Result<Vec<Value>, DbError> {
        self.executor().distinct_values_by(&self.query, field.as_ref())
    }

    pub fn group_count_by(&self, field: impl AsRef<str>) -> Result<Vec<(Value, u32)>, DbError> {
        self.executor().group_count_by(&self.query, field.as_ref())
    }

    // ------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------

    fn executor(&self) -> LoadExecutor<'a, E> {
        LoadExecutor::new(self.db, self.db.debug)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_support::TestRecord, types::Id};

    fn seeded_db() -> Db {
        let mut db = Db::new();
        for (name, points) in [("ash", 30), ("birch", 10), ("cedar", 20)] {
            db.insert(TestRecord {
                name: name.to_string(),
                points,
                ..TestRecord::default()
            })
            .unwrap();
        }

        db
    }

    #[test]
    fn chained_filters_merge_as_conjunction() {
        let db = seeded_db();

        let entities = db
            .load::<TestRecord>()
            .filter(FilterExpr::gte("points", 10))
            .filter(FilterExpr::lt("points", 30))
            .entities()
            .unwrap();

        let names: Vec<_> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["birch", "cedar"]);
    }

    #[test]
    fn or_filter_widens_the_match() {
        let db = seeded_db();

        let count = db
            .load::<TestRecord>()
            .filter(FilterExpr::eq("name", "ash"))
            .or_filter(FilterExpr::eq("name", "cedar"))
            .count()
            .unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn filter_opt_none_leaves_the_query_unfiltered() {
        let db = seeded_db();

        let count = db.load::<TestRecord>().filter_opt(None).count().unwrap();

        assert_eq!(count, 3);
    }

    #[test]
    fn terminals_route_through_the_same_intent() {
        let db = seeded_db();

        let query = db
            .load::<TestRecord>()
            .filter(FilterExpr::eq("name", "birch"));

        let (id, entity) = query.one().unwrap();
        assert_eq!(id, Id::new(2));
        assert_eq!(entity.points, 10);
    }

    #[test]
    fn ordering_and_window_compose_with_terminals() {
        let db = seeded_db();

        let first = db
            .load::<TestRecord>()
            .order_by_desc("points")
            .offset(1)
            .limit(1)
            .first()
            .unwrap();

        let (_, entity) = first.expect("window retains one row");
        assert_eq!(entity.name, "cedar");
    }
}
