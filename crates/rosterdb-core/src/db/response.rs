use crate::{traits::EntityKind, types::Id};
use thiserror::Error as ThisError;

///
/// Row
///

pub type Row<E> = (Id<E>, E);

///
/// ResponseError
/// Errors related to interpreting a materialized response.
///

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one row, found 0 (entity {entity})")]
    NotFound { entity: &'static str },

    #[error("expected exactly one row, found {count} (entity {entity})")]
    NotUnique { entity: &'static str, count: u64 },
}

///
/// Response
/// Materialized query result: ordered `(Id, Entity)` pairs.
///

#[derive(Debug)]
pub struct Response<E: EntityKind>(pub Vec<Row<E>>);

impl<E: EntityKind> Response<E> {
    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.0.len() as u64
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // ------------------------------------------------------------------
    // Cardinality enforcement
    // ------------------------------------------------------------------

    pub const fn require_one(&self) -> Result<(), ResponseError> {
        match self.count() {
            1 => Ok(()),
            0 => Err(ResponseError::NotFound { entity: E::PATH }),
            n => Err(ResponseError::NotUnique {
                entity: E::PATH,
                count: n,
            }),
        }
    }

    pub const fn require_some(&self) -> Result<(), ResponseError> {
        if self.is_empty() {
            Err(ResponseError::NotFound { entity: E::PATH })
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    /// Exactly-one mode; fails on zero rows and on more than one.
    pub fn one(self) -> Result<Row<E>, ResponseError> {
        self.require_one()?;
        Ok(self.0.into_iter().next().unwrap())
    }

    /// At-most-one mode; `None` on zero rows, fails on more than one.
    pub fn one_opt(self) -> Result<Option<Row<E>>, ResponseError> {
        match self.count() {
            0 => Ok(None),
            1 => Ok(Some(self.0.into_iter().next().unwrap())),
            n => Err(ResponseError::NotUnique {
                entity: E::PATH,
                count: n,
            }),
        }
    }

    #[must_use]
    pub fn rows(self) -> Vec<Row<E>> {
        self.0
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    pub fn entity(self) -> Result<E, ResponseError> {
        self.one().map(|(_, e)| e)
    }

    pub fn entity_opt(self) -> Result<Option<E>, ResponseError> {
        Ok(self.one_opt()?.map(|(_, e)| e))
    }

    #[must_use]
    pub fn entities(self) -> Vec<E> {
        self.0.into_iter().map(|(_, e)| e).collect()
    }

    // ------------------------------------------------------------------
    // Ids
    // ------------------------------------------------------------------

    #[must_use]
    pub fn key(&self) -> Option<Id<E>> {
        self.0.first().map(|(k, _)| *k)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<Id<E>> {
        self.0.iter().map(|(k, _)| *k).collect()
    }

    #[must_use]
    pub fn contains_key(&self, key: &Id<E>) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    // ------------------------------------------------------------------
    // Explicitly non-strict access (escape hatches)
    // ------------------------------------------------------------------

    /// NOTE: Bypasses cardinality checks. Prefer strict APIs unless intentional.
    #[must_use]
    pub fn first(self) -> Option<Row<E>> {
        self.0.into_iter().next()
    }

    #[must_use]
    pub fn first_entity(self) -> Option<E> {
        self.first().map(|(_, e)| e)
    }
}

impl<E: EntityKind> IntoIterator for Response<E> {
    type Item = Row<E>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

///
/// TESTS
///
