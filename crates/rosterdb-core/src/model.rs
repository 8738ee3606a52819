///
/// EntityModel
/// Hand-declared runtime model for one entity.
///

pub struct EntityModel {
    /// Fully-qualified schema path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Stable external name used in diagnostics.
    pub entity_name: &'static str,
    /// Primary key field name (names an entry in `fields`).
    pub primary_key: &'static str,
    /// Ordered field list (authoritative for validation).
    pub fields: &'static [EntityFieldModel],
}

impl EntityModel {
    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&EntityFieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }
}

///
/// EntityFieldModel
/// Runtime field metadata used by validation.
///

pub struct EntityFieldModel {
    /// Field name as used in predicates and ordering.
    pub name: &'static str,
    /// Runtime type shape.
    pub kind: EntityFieldKind,
}

///
/// EntityFieldKind
///
/// Minimal type surface needed by the validator.
/// Aligned with `Value` variants; this is a lossy projection of field types.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityFieldKind {
    Bool,
    Float64,
    Int,
    /// Nullable foreign-key reference to another entity's surrogate key.
    Ref {
        target: &'static str,
    },
    Text,
    Uint,
}

impl EntityFieldKind {
    /// True for kinds that participate in numeric aggregation and widening.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float64 | Self::Int | Self::Uint)
    }

    /// True for kinds that support substring/prefix/suffix operators.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[EntityFieldModel] = &[
        EntityFieldModel {
            name: "id",
            kind: EntityFieldKind::Uint,
        },
        EntityFieldModel {
            name: "label",
            kind: EntityFieldKind::Text,
        },
    ];

    const MODEL: EntityModel = EntityModel {
        path: "tests::Widget",
        entity_name: "widget",
        primary_key: "id",
        fields: FIELDS,
    };

    #[test]
    fn field_lookup_finds_declared_fields_only() {
        assert_eq!(MODEL.field("label").map(|f| f.name), Some("label"));
        assert!(MODEL.field("missing").is_none());
    }

    #[test]
    fn kind_classification() {
        assert!(EntityFieldKind::Int.is_numeric());
        assert!(EntityFieldKind::Float64.is_numeric());
        assert!(!EntityFieldKind::Ref { target: "t" }.is_numeric());
        assert!(EntityFieldKind::Text.is_text());
        assert!(!EntityFieldKind::Uint.is_text());
    }
}
