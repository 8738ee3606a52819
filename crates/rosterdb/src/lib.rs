//! RosterDB facade: the `Member`/`Team` schema, its custom repository, and
//! the runtime surface re-exported for application code.
//!
//! ## Crate layout
//! - `core`: runtime engine (entities, stores, filters, queries, executors).
//! - `domain`: the `Member`/`Team` schema and `MemberRepository`.
//!
//! The `prelude` module mirrors the runtime surface used by application code.

pub use rosterdb_core as core;

pub mod domain;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            db::{
                Db, DbError,
                filter::{Cmp, FilterClause, FilterExpr, FilterExprOpt},
                query::{LoadQuery, OrderDirection},
                response::{Response, ResponseError},
            },
            traits::{EntityKind as _, EntityValue as _, Path as _},
            types::{Float64, Id},
            value::Value,
        },
        domain::{Member, MemberRepository, Team},
    };
    pub use serde::{Deserialize, Serialize};
}
