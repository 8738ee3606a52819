mod eval;
mod expr;


pub use expr::{FilterClause, FilterExpr, FilterExprOpt};

pub(crate) use eval::eval;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// Cmp
///
/// Comparison operator applied between a row field and a literal.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    StartsWith,
    EndsWith,
    IsNone,
    IsSome,
}

impl Cmp {
    /// Operators that are only defined for text fields.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }
}

impl Display for Cmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::IsNone => "is_none",
            Self::IsSome => "is_some",
        };

        write!(f, "{s}")
    }
}
