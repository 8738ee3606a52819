use crate::{
    core::{
        model::{EntityFieldKind, EntityFieldModel, EntityModel},
        traits::{
            EntityIdentity, EntityKind, EntitySchema, EntityValue, FieldValue, FieldValues, Path,
        },
        types::Id,
        value::Value,
    },
    domain::Team,
};
use serde::{Deserialize, Serialize};

///
/// Member
///
/// A roster entry: display name, age, and an optional foreign key to the
/// Team it belongs to.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Member {
    pub id: Id<Self>,
    pub user_name: String,
    pub age: i32,
    pub team_id: Option<Id<Team>>,
}

impl Member {
    #[must_use]
    pub fn new(user_name: impl Into<String>, age: i32) -> Self {
        Self {
            id: Id::default(),
            user_name: user_name.into(),
            age,
            team_id: None,
        }
    }

    /// Attach the member to a persisted team.
    #[must_use]
    pub const fn with_team(mut self, team_id: Id<Team>) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

impl Path for Member {
    const PATH: &'static str = "roster::Member";
}

impl EntityIdentity for Member {
    const ENTITY_NAME: &'static str = "Member";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntitySchema for Member {
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
                name: "user_name",
                kind: EntityFieldKind::Text,
            },
            EntityFieldModel {
                name: "age",
                kind: EntityFieldKind::Int,
            },
            EntityFieldModel {
                name: "team_id",
                kind: EntityFieldKind::Ref { target: Team::PATH },
            },
        ],
    };
}

impl EntityValue for Member {
    fn id(&self) -> Id<Self> {
        self.id
    }

    fn set_id(&mut self, id: Id<Self>) {
        self.id = id;
    }
}

impl FieldValues for Member {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "user_name" => Some(self.user_name.to_value()),
            "age" => Some(self.age.to_value()),
            "team_id" => Some(self.team_id.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for Member {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape_is_stable() {
        let member = Member::new("member1", 10);

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 0,
                "user_name": "member1",
                "age": 10,
                "team_id": null,
            })
        );
    }

    #[test]
    fn unattached_member_surfaces_a_null_team_slot() {
        let member = Member::new("member5", 50);

        assert_eq!(member.get_value("team_id"), Some(Value::Null));
    }

    #[test]
    fn field_values_cover_the_declared_model() {
        let member = Member::new("member1", 10);

        for field in Member::MODEL.fields {
            assert!(
                member.get_value(field.name).is_some(),
                "field {}",
                field.name
            );
        }
        assert_eq!(member.get_value("nope"), None);
    }
}
