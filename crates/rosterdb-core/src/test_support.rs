//! Shared fixture entity for core-level tests.
//!
//! `TestRecord` carries one field of every kind the validator knows, so
//! store, filter, query, and executor tests can share a single schema.

use crate::{
    model::{EntityFieldKind, EntityFieldModel, EntityModel},
    traits::{
        EntityIdentity, EntityKind, EntitySchema, EntityValue, FieldValue, FieldValues, Path,
    },
    types::{Float64, Id},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// TestRecord
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct TestRecord {
    pub id: Id<Self>,
    pub name: String,
    pub points: i64,
    pub score: Option<i64>,
    pub ratio: Float64,
    pub active: bool,
    pub parent_id: Option<Id<Self>>,
}

impl Path for TestRecord {
    const PATH: &'static str = "test_support::TestRecord";
}

impl EntityIdentity for TestRecord {
    const ENTITY_NAME: &'static str = "TestRecord";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntitySchema for TestRecord {
    const MODEL: &'static EntityModel = &EntityModel {
        path: Self::PATH,
        entity_name: Self::ENTITY_NAME,
        primary_key: Self::PRIMARY_KEY,
        fields: &[
            EntityFieldModel {
                name: "id",
                kind: EntityFieldKind::Uint,
            },
            EntityFieldModel {
                name: "name",
                kind: EntityFieldKind::Text,
            },
            EntityFieldModel {
                name: "points",
                kind: EntityFieldKind::Int,
            },
            EntityFieldModel {
                name: "score",
                kind: EntityFieldKind::Int,
            },
            EntityFieldModel {
                name: "ratio",
                kind: EntityFieldKind::Float64,
            },
            EntityFieldModel {
                name: "active",
                kind: EntityFieldKind::Bool,
            },
            EntityFieldModel {
                name: "parent_id",
                kind: EntityFieldKind::Ref {
                    target: Self::PATH,
                },
            },
        ],
    };
}

impl EntityValue for TestRecord {
    fn id(&self) -> Id<Self> {
        self.id
    }

    fn set_id(&mut self, id: Id<Self>) {
        self.id = id;
    }
}

impl FieldValues for TestRecord {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "points" => Some(self.points.to_value()),
            "score" => Some(self.score.to_value()),
            "ratio" => Some(self.ratio.to_value()),
            "active" => Some(self.active.to_value()),
            "parent_id" => Some(self.parent_id.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for TestRecord {}
