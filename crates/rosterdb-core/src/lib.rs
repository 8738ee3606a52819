//! Core runtime for RosterDB: entity traits, values, stores, filters,
//! queries, and executors, with the ergonomics exported via the facade crate.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod model;
pub mod serialize;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, stores, or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{EntityFieldKind, EntityFieldModel, EntityModel},
        traits::{EntityIdentity, EntityKind, Path},
        types::Id,
        value::Value,
    };
}
