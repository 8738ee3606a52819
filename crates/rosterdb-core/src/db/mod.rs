pub mod executor;
pub mod filter;
pub mod query;
pub mod response;
pub mod store;

use crate::{
    db::{
        executor::{ExecutorError, SaveExecutor},
        query::{LoadQuery, QueryError},
        response::ResponseError,
        store::{DataStoreRegistry, StoreError},
    },
    serialize::SerializeError,
    traits::EntityKind,
};
use thiserror::Error as ThisError;

///
/// DbError
///

#[derive(Debug, ThisError)]
pub enum DbError {
    #[error(transparent)]
    ExecutorError(#[from] ExecutorError),

    #[error(transparent)]
    QueryError(#[from] QueryError),

    #[error(transparent)]
    ResponseError(#[from] ResponseError),

    #[error(transparent)]
    SerializeError(#[from] SerializeError),

    #[error(transparent)]
    StoreError(#[from] StoreError),
}

///
/// Db
///
/// An in-memory database session owning one store per entity path.
///
/// The `Db` acts as the entry point for querying and saving entities.
/// Loads borrow the session immutably; saves take it mutably, so the
/// borrow checker rules out writes racing an open query.
///

#[derive(Debug, Default)]
pub struct Db {
    pub(crate) registry: DataStoreRegistry,
    pub(crate) debug: bool,
}

impl Db {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: DataStoreRegistry::new(),
            debug: false,
        }
    }

    /// Enable per-query debug logging on this session.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// Start a fluent load query for one entity type.
    #[must_use]
    pub const fn load<E: EntityKind>(&self) -> LoadQuery<'_, E> {
        LoadQuery::new(self)
    }

    /// Insert a brand-new entity and return it with its assigned id.
    pub fn insert<E: EntityKind>(&mut self, entity: E) -> Result<E, DbError> {
        let debug = self.debug;
        SaveExecutor::new(self, debug).insert(entity)
    }

    /// Insert a batch of entities, fail-fast and non-atomic.
    pub fn insert_many<E: EntityKind>(
        &mut self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, DbError> {
        let debug = self.debug;
        SaveExecutor::new(self, debug).insert_many(entities)
    }

    /// Update an existing entity in place.
    pub fn update<E: EntityKind>(&mut self, entity: E) -> Result<E, DbError> {
        let debug = self.debug;
        SaveExecutor::new(self, debug).update(entity)
    }
}
