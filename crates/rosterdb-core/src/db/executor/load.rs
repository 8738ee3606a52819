use crate::{
    db::{
        Db, DbError,
        executor::yes_no,
        filter::eval,
        query::{OrderDirection, Page, Query, validate},
        response::{Response, Row},
        store::StoreError,
    },
    traits::EntityKind,
    types::Id,
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, marker::PhantomData};

///
/// LoadExecutor
///
/// Runs a validated query against the live store in one pass:
/// scan, decode, filter, order, window.
///

pub(crate) struct LoadExecutor<'a, E: EntityKind> {
    db: &'a Db,
    debug: bool,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> LoadExecutor<'a, E> {
    // ======================================================================
    // Construction & configuration
    // ======================================================================

    #[must_use]
    pub(crate) const fn new(db: &'a Db, debug: bool) -> Self {
        Self {
            db,
            debug,
            _marker: PhantomData,
        }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    // ======================================================================
    // Execution pipeline
    // ======================================================================

    pub(crate) fn execute(&self, query: &Query<E>) -> Result<Response<E>, DbError> {
        validate::<E>(query)?;

        if self.debug {
            self.debug_log(format!("Executing load query on {}", E::PATH));

            let page = if query.page == Page::unbounded() {
                "none".to_string()
            } else {
                format!("limit={:?}, offset={}", query.page.limit, query.page.offset)
            };

            self.debug_log(format!(
                "Post-access: filter={}, order={}, page={}",
                yes_no(query.filter.is_some()),
                yes_no(!query.order.is_empty()),
                page
            ));
        }

        let mut rows = self.scan(query)?;

        // Store scans iterate in ascending key order, so an unordered query
        // already comes back sorted by id without an explicit sort pass.
        if !query.order.is_empty() {
            sort_rows(&mut rows, &query.order);
        }

        apply_page(&mut rows, query.page);

        Ok(Response(rows))
    }

    /// Decode and filter every row in the entity's store.
    ///
    /// An absent store means no row of this entity was ever written;
    /// it reads as empty rather than erroring.
    fn scan(&self, query: &Query<E>) -> Result<Vec<Row<E>>, DbError> {
        let Some(store) = self.db.registry.get(E::PATH) else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        for (&key, raw) in store.iter() {
            let entity: E = raw.try_decode().map_err(|source| StoreError::Corrupt {
                path: E::PATH,
                key,
                source,
            })?;

            if query.filter.as_ref().is_none_or(|expr| eval(&entity, expr)) {
                rows.push((Id::new(key), entity));
            }
        }

        Ok(rows)
    }
}

// ======================================================================
// Ordering & windowing
// ======================================================================

/// Sort rows by each order key in turn under the canonical value ordering,
/// breaking remaining ties by ascending id so equal keys stay deterministic.
fn sort_rows<E: EntityKind>(rows: &mut [Row<E>], order: &[(String, OrderDirection)]) {
    rows.sort_by(|(a_id, a), (b_id, b)| {
        for (field, direction) in order {
            let a_value = a.get_value(field).unwrap_or(Value::Null);
            let b_value = b.get_value(field).unwrap_or(Value::Null);

            let ordering = match direction {
                OrderDirection::Asc => canonical_cmp(&a_value, &b_value),
                OrderDirection::Desc => canonical_cmp(&a_value, &b_value).reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        a_id.cmp(b_id)
    });
}

/// Apply the pagination window to the ordered row set.
fn apply_page<E: EntityKind>(rows: &mut Vec<Row<E>>, page: Page) {
    let offset = page.offset as usize;
    if offset > 0 {
        if offset >= rows.len() {
            rows.clear();
        } else {
            rows.drain(..offset);
        }
    }

    if let Some(limit) = page.limit {
        rows.truncate(limit as usize);
    }
}

///
/// TESTS
///
