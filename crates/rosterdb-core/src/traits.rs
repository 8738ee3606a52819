use crate::{model::EntityModel, types::Id, value::Value};
use serde::{Serialize, de::DeserializeOwned};

///
/// Path
/// Fully-qualified schema location of a type; keys the store registry.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityIdentity
///
/// Naming facts about an entity: the diagnostic name and which declared
/// field carries the surrogate key. The key itself is a `u64` assigned
/// by the store sequence; `Id<Self>` is its typed view.
///

pub trait EntityIdentity: Path {
    const ENTITY_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
}

///
/// EntitySchema
/// Hands the validator the entity's static field model.
///

pub trait EntitySchema: EntityIdentity {
    const MODEL: &'static EntityModel;
}

///
/// EntityValue
///
/// Instance-level identity access. `id()` wraps the stored key in its
/// typed form; `set_id()` is the write-back the save path uses when the
/// sequence assigns a key at first insert.
///

pub trait EntityValue: EntityIdentity + FieldValues + Sized {
    fn id(&self) -> Id<Self>;

    fn set_id(&mut self, id: Id<Self>);
}

///
/// EntityKind
///
/// Everything storage and execution need, in one bound. Nothing below
/// the executors should ask for this much.
///

pub trait EntityKind:
    EntitySchema + EntityValue + Clone + Default + PartialEq + Serialize + DeserializeOwned + 'static
{
}

///
/// FieldValues
/// Field projection by declared name, as runtime `Value`s.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// FieldValue
///
/// Anything usable as the literal side of a filter clause.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

macro_rules! int_operands {
    ( $( $ty:ty ),+ ) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )+
    };
}

macro_rules! uint_operands {
    ( $( $ty:ty ),+ ) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }
            }
        )+
    };
}

int_operands!(i8, i16, i32, i64);
uint_operands!(u8, u16, u32, u64);

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_owned())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(T::to_value).collect())
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Self {
        self.clone()
    }
}

// presence clauses carry no right-hand operand
impl FieldValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

///
/// TESTS
///
