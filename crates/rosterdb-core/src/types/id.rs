use crate::{
    traits::{EntityIdentity, FieldValue},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, marker::PhantomData};

///
/// Id
///
/// Surrogate key for one entity type. The `u64` inside is what the store
/// sequence hands out; the phantom parameter stops a key for one entity
/// from standing in for another. On the wire it is the bare number, and
/// key 0 is the not-yet-persisted sentinel.
///
/// The phantom is `fn() -> E` so the wrapper stays `Copy`, `Send`, and
/// `Sync` regardless of `E`.
///

#[repr(transparent)]
#[derive(Deserialize, Serialize)]
#[serde(bound = "", transparent)]
pub struct Id<E: EntityIdentity> {
    key: u64,
    #[serde(skip)]
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityIdentity> Id<E> {
    pub(crate) const fn new(key: u64) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn key(&self) -> u64 {
        self.key
    }

    /// True until a store sequence assigns a real key.
    pub(crate) const fn is_unset(&self) -> bool {
        self.key == 0
    }
}

// manual impls: derives would put bounds on E, and the phantom makes
// that unnecessary
#[allow(clippy::expl_impl_clone_on_copy)]
impl<E: EntityIdentity> Clone for Id<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: EntityIdentity> Copy for Id<E> {}

impl<E: EntityIdentity> Default for Id<E> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<E: EntityIdentity> fmt::Debug for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.key)
    }
}

impl<E: EntityIdentity> fmt::Display for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<E: EntityIdentity> PartialEq for Id<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E: EntityIdentity> Eq for Id<E> {}

impl<E: EntityIdentity> Ord for Id<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<E: EntityIdentity> PartialOrd for Id<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: EntityIdentity> FieldValue for Id<E> {
    fn to_value(&self) -> Value {
        Value::Uint(self.key)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        serialize::{deserialize, serialize},
        test_support::TestRecord,
    };

    #[test]
    fn serializes_as_the_bare_key() {
        let id = Id::<TestRecord>::new(7);

        let bytes = serialize(&id).unwrap();
        assert_eq!(bytes, serialize(&7_u64).unwrap());

        let back: Id<TestRecord> = deserialize(&bytes).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn default_is_the_unassigned_sentinel() {
        let id = Id::<TestRecord>::default();

        assert!(id.is_unset());
        assert_eq!(id.to_value(), Value::Uint(0));
    }
}
