use crate::{
    db::{
        Db, DbError,
        executor::{ExecutorError, SaveMode},
        store::{RawRow, StoreError},
    },
    serialize::serialize,
    traits::EntityKind,
    types::Id,
};
use std::marker::PhantomData;

///
/// SaveExecutor
///
/// Writes one entity at a time into its store. Keys are owned by the store
/// sequence: inserts draw a fresh key and write it back into the entity,
/// updates overwrite the row their assigned key points at.
///

pub(crate) struct SaveExecutor<'a, E: EntityKind> {
    db: &'a mut Db,
    debug: bool,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> SaveExecutor<'a, E> {
    // ======================================================================
    // Construction & configuration
    // ======================================================================

    #[must_use]
    pub(crate) const fn new(db: &'a mut Db, debug: bool) -> Self {
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
    // Single-entity save operations
    // ======================================================================

    /// Insert a brand-new entity (errors if its id is already assigned).
    pub(crate) fn insert(&mut self, entity: E) -> Result<E, DbError> {
        self.save_entity(SaveMode::Insert, entity)
    }

    /// Update an existing entity (errors if it does not exist).
    pub(crate) fn update(&mut self, entity: E) -> Result<E, DbError> {
        self.save_entity(SaveMode::Update, entity)
    }

    // ======================================================================
    // Batch save operations (fail-fast, non-atomic)
    // ======================================================================

    pub(crate) fn insert_many(
        &mut self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, DbError> {
        let iter = entities.into_iter();
        let mut out = Vec::with_capacity(iter.size_hint().0);

        // Batch semantics: fail-fast and non-atomic; partial successes remain.
        // Retry-safe only with caller idempotency and conflict handling.
        for entity in iter {
            out.push(self.insert(entity)?);
        }

        Ok(out)
    }

    // ======================================================================
    // Low-level execution
    // ======================================================================

    fn save_entity(&mut self, mode: SaveMode, mut entity: E) -> Result<E, DbError> {
        self.debug_log(format!("Executing {mode:?} on {}", E::PATH));

        let store = self.db.registry.get_or_create(E::PATH);
        let id = entity.id();

        let key = match (mode, id.is_unset()) {
            (SaveMode::Insert, true) => {
                let key = store.allocate_key();
                entity.set_id(Id::new(key));

                key
            }
            (SaveMode::Insert, false) => {
                return Err(ExecutorError::KeyExists {
                    path: E::PATH,
                    key: id.key(),
                }
                .into());
            }
            (SaveMode::Update, false) if store.contains_key(&id.key()) => id.key(),
            (SaveMode::Update, _) => {
                return Err(ExecutorError::KeyNotFound {
                    path: E::PATH,
                    key: id.key(),
                }
                .into());
            }
        };

        let bytes = serialize(&entity)?;
        let row = RawRow::try_new(bytes).map_err(StoreError::from)?;
        store.insert(key, row);

        self.debug_log(format!("Persisted row {key} (entity {})", E::PATH));

        Ok(entity)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::executor::LoadExecutor, db::query::Query, test_support::TestRecord};

    fn record(name: &str) -> TestRecord {
        TestRecord {
            name: name.to_string(),
            ..TestRecord::default()
        }
    }

    #[test]
    fn insert_assigns_sequential_ids_and_writes_them_back() {
        let mut db = Db::new();

        let first = SaveExecutor::new(&mut db, false).insert(record("ash")).unwrap();
        let second = SaveExecutor::new(&mut db, false)
            .insert(record("birch"))
            .unwrap();

        assert_eq!(first.id, Id::new(1));
        assert_eq!(second.id, Id::new(2));
    }

    #[test]
    fn insert_rejects_an_already_assigned_id() {
        let mut db = Db::new();

        let stored = SaveExecutor::new(&mut db, false).insert(record("ash")).unwrap();
        let err = SaveExecutor::new(&mut db, false).insert(stored).unwrap_err();

        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn update_overwrites_the_stored_row() {
        let mut db = Db::new();

        let mut stored = SaveExecutor::new(&mut db, false).insert(record("ash")).unwrap();
        stored.points = 99;
        SaveExecutor::new(&mut db, false).update(stored).unwrap();

        let response = LoadExecutor::<TestRecord>::new(&db, false)
            .execute(&Query::new())
            .unwrap();
        assert_eq!(response.0.len(), 1);
        assert_eq!(response.0[0].1.points, 99);
    }

    #[test]
    fn update_requires_an_existing_row() {
        let mut db = Db::new();

        // Unassigned id.
        let err = SaveExecutor::new(&mut db, false)
            .update(record("ash"))
            .unwrap_err();
        assert!(err.to_string().contains("not found"));

        // Assigned id with no backing row.
        let mut ghost = record("birch");
        ghost.id = Id::new(42);
        let err = SaveExecutor::new(&mut db, false).update(ghost).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn insert_many_is_fail_fast_and_keeps_partial_successes() {
        let mut db = Db::new();

        let mut poisoned = record("cedar");
        poisoned.id = Id::new(7);

        let result = SaveExecutor::new(&mut db, false)
            .insert_many([record("ash"), record("birch"), poisoned, record("dogwood")]);
        assert!(result.is_err());

        // The two entities before the failure remain persisted.
        let response = LoadExecutor::<TestRecord>::new(&db, false)
            .execute(&Query::new())
            .unwrap();
        assert_eq!(response.0.len(), 2);
    }
}
