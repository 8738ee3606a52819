use crate::{db::filter::Cmp, traits::FieldValue, value::Value};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

// one constructor per scalar comparison operator
macro_rules! cmp_constructors {
    ( $( $name:ident => $cmp:ident ),* $(,)? ) => {
        $(
            #[doc = concat!("Build a `", stringify!($cmp), "` clause against `field`.")]
            pub fn $name(field: impl Into<String>, value: impl FieldValue) -> Self {
                Self::clause(field, Cmp::$cmp, value)
            }
        )*
    };
}

///
/// FilterExpr
///
/// Boolean expression tree over entity fields. Leaves are constants or
/// single `FilterClause` comparisons; `And`/`Or` hold flattened child
/// lists and `Not` wraps one child.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FilterExpr {
    #[default]
    True,
    False,
    Clause(FilterClause),
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl FilterExpr {
    /// Build a single `field cmp value` clause.
    pub fn clause(field: impl Into<String>, cmp: Cmp, value: impl FieldValue) -> Self {
        Self::Clause(FilterClause::new(field, cmp, value))
    }

    cmp_constructors!(
        eq => Eq,
        ne => Ne,
        lt => Lt,
        lte => Lte,
        gt => Gt,
        gte => Gte,
        contains => Contains,
        starts_with => StartsWith,
        ends_with => EndsWith,
    );

    /// Inclusive range check, expanded to `gte AND lte` on the same field.
    pub fn between(field: impl Into<String>, lo: impl FieldValue, hi: impl FieldValue) -> Self {
        let field = field.into();

        Self::gte(field.clone(), lo).and(Self::lte(field, hi))
    }

    /// Field slot holds a value (a `Null` slot does not count).
    pub fn is_some(field: impl Into<String>) -> Self {
        Self::clause(field, Cmp::IsSome, ())
    }

    /// Field slot holds `Null`.
    pub fn is_none(field: impl Into<String>) -> Self {
        Self::clause(field, Cmp::IsNone, ())
    }

    /// Membership in a literal set.
    pub fn in_iter<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        Self::clause(field, Cmp::In, collect_list(values))
    }

    /// Absence from a literal set.
    pub fn not_in_iter<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        Self::clause(field, Cmp::NotIn, collect_list(values))
    }

    // --- combinators ---

    /// Conjoin two expressions, merging `And` children from either side
    /// so chains stay one level deep.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut children = self.into_and_children();
        children.extend(other.into_and_children());

        Self::And(children)
    }

    /// Conjoin with a criterion that may be absent; `None` is identity.
    #[must_use]
    pub fn and_option(self, other: Option<Self>) -> Self {
        match other {
            Some(expr) => self.and(expr),
            None => self,
        }
    }

    /// Disjoin two expressions, merging `Or` children from either side.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let mut children = self.into_or_children();
        children.extend(other.into_or_children());

        Self::Or(children)
    }

    /// Disjoin with a criterion that may be absent; `None` is identity.
    #[must_use]
    pub fn or_option(self, other: Option<Self>) -> Self {
        match other {
            Some(expr) => self.or(expr),
            None => self,
        }
    }

    /// Negate this expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    fn into_and_children(self) -> Vec<Self> {
        match self {
            Self::And(children) => children,
            expr => vec![expr],
        }
    }

    fn into_or_children(self) -> Vec<Self> {
        match self {
            Self::Or(children) => children,
            expr => vec![expr],
        }
    }

    // --- normalization ---

    /// Constant-fold and normalize the tree.
    ///
    /// Double negations drop, `Not` pushes through `And`/`Or` (De
    /// Morgan), nested groups of the same kind flatten, and constants
    /// fold: `True` is neutral for `And` and absorbing for `Or`,
    /// `False` the reverse. Single-child groups unwrap, empty groups
    /// fold to their neutral constant.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Not(inner) => Self::simplify_not(*inner),
            Self::And(children) => Self::simplify_group(children, true),
            Self::Or(children) => Self::simplify_group(children, false),
            leaf => leaf,
        }
    }

    fn simplify_not(inner: Self) -> Self {
        match inner {
            Self::True => Self::False,
            Self::False => Self::True,

            // double negation
            Self::Not(expr) => (*expr).simplify(),

            // De Morgan, then normalize the rewritten group
            Self::And(children) => {
                Self::Or(children.into_iter().map(Self::not).collect()).simplify()
            }
            Self::Or(children) => {
                Self::And(children.into_iter().map(Self::not).collect()).simplify()
            }

            clause => Self::Not(Box::new(clause)),
        }
    }

    fn simplify_group(children: Vec<Self>, conjunctive: bool) -> Self {
        let (absorb, neutral) = if conjunctive {
            (Self::False, Self::True)
        } else {
            (Self::True, Self::False)
        };

        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child.simplify() {
                Self::And(nested) if conjunctive => flat.extend(nested),
                Self::Or(nested) if !conjunctive => flat.extend(nested),
                expr if expr == absorb => return absorb,
                expr if expr == neutral => {}
                expr => flat.push(expr),
            }
        }

        match flat.len() {
            0 => neutral,
            1 => flat.swap_remove(0),
            _ if conjunctive => Self::And(flat),
            _ => Self::Or(flat),
        }
    }
}

fn collect_list<I>(values: I) -> Value
where
    I: IntoIterator,
    I::Item: FieldValue,
{
    Value::List(values.into_iter().map(|v| v.to_value()).collect())
}

///
/// Bit Operations
/// allow us to do | & and ! on expressions
///

impl BitAnd for FilterExpr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for FilterExpr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for FilterExpr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

///
/// FilterExprOpt
///
/// `Option<FilterExpr>` carrying the same operators, where an absent
/// side is the identity for both `&` and `|`.
///

#[repr(transparent)]
#[derive(Clone, Debug, Deref, DerefMut, Eq, PartialEq)]
pub struct FilterExprOpt(pub Option<FilterExpr>);

impl FilterExprOpt {
    fn join(self, rhs: Self, merge: fn(FilterExpr, FilterExpr) -> FilterExpr) -> Self {
        let combined = match (self.0, rhs.0) {
            (Some(a), Some(b)) => Some(merge(a, b)),
            (a, b) => a.or(b),
        };

        Self(combined)
    }
}

impl BitAnd for FilterExprOpt {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.join(rhs, FilterExpr::and)
    }
}

impl BitOr for FilterExprOpt {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.join(rhs, FilterExpr::or)
    }
}

impl Not for FilterExprOpt {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0.map(FilterExpr::not))
    }
}

impl From<Option<FilterExpr>> for FilterExprOpt {
    fn from(opt: Option<FilterExpr>) -> Self {
        Self(opt)
    }
}

impl From<FilterExprOpt> for Option<FilterExpr> {
    fn from(opt: FilterExprOpt) -> Self {
        opt.0
    }
}

///
/// FilterClause
/// One comparison: a named field against a literal operand.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterClause {
    pub field: String,
    pub cmp: Cmp,
    pub value: Value,
}

impl FilterClause {
    #[must_use]
    pub fn new(field: impl Into<String>, cmp: Cmp, value: impl FieldValue) -> Self {
        Self {
            field: field.into(),
            cmp,
            value: value.to_value(),
        }
    }
}

///
/// TESTS
///
