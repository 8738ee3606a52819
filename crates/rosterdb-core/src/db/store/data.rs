use crate::db::store::RawRow;
use derive_more::{Deref, DerefMut};
use std::collections::BTreeMap;

///
/// DataStoreRegistry
///
/// One `DataStore` per entity path, created lazily on first use.
/// A path with no store yet reads as an empty table.
///

#[derive(Debug, Default, Deref, DerefMut)]
pub struct DataStoreRegistry(BTreeMap<&'static str, DataStore>);

impl DataStoreRegistry {
    /// Create an empty data store registry.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Borrow the store for a path, creating it if absent.
    pub fn get_or_create(&mut self, path: &'static str) -> &mut DataStore {
        self.0.entry(path).or_default()
    }
}

///
/// DataStore
///
/// Rows for a single entity type, keyed by primary key.
/// `sequence` is the last key handed out; keys start at 1 so that
/// key 0 can mean "not yet assigned".
///

#[derive(Debug, Default, Deref, DerefMut)]
pub struct DataStore {
    #[deref]
    #[deref_mut]
    rows: BTreeMap<u64, RawRow>,
    sequence: u64,
}

impl DataStore {
    /// Hand out the next primary key from this store's sequence.
    pub const fn allocate_key(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

///
/// TESTS
///
