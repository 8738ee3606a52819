use crate::core::{
    model::{EntityFieldKind, EntityFieldModel, EntityModel},
    traits::{
        EntityIdentity, EntityKind, EntitySchema, EntityValue, FieldValue, FieldValues, Path,
    },
    types::Id,
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Team
///
/// A named group Members may reference. The association is one-directional:
/// `Member.team_id` points here, a Team never owns its member list.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Team {
    pub id: Id<Self>,
    pub name: String,
}

impl Team {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::default(),
            name: name.into(),
        }
    }
}

impl Path for Team {
    const PATH: &'static str = "roster::Team";
}

impl EntityIdentity for Team {
    const ENTITY_NAME: &'static str = "Team";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntitySchema for Team {
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
        ],
    };
}

impl EntityValue for Team {
    fn id(&self) -> Id<Self> {
        self.id
    }

    fn set_id(&mut self, id: Id<Self>) {
        self.id = id;
    }
}

impl FieldValues for Team {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for Team {}

///
/// TESTS
///
