use crate::{
    core::db::{Db, DbError, filter::FilterExpr},
    domain::Member,
};

///
/// MemberRepository
///
/// Custom read surface over `Member`. Everything else (saves, ad-hoc
/// queries, aggregation) goes through the session's fluent API directly.
///

pub struct MemberRepository<'a> {
    db: &'a Db,
}

impl<'a> MemberRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// All members whose `user_name` equals `name`, in id order.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Member>, DbError> {
        self.db
            .load::<Member>()
            .filter(FilterExpr::eq("user_name", name))
            .entities()
    }

    /// Members matching every *supplied* criterion, in id order.
    ///
    /// Each present criterion becomes an equality clause; absent criteria
    /// constrain nothing. With both absent the composed filter stays
    /// structurally `None` and the scan runs unfiltered, rather than
    /// degenerating into an empty conjunction.
    pub fn find_user(
        &self,
        name: Option<&str>,
        age: Option<i32>,
    ) -> Result<Vec<Member>, DbError> {
        let name_filter = name.map(|name| FilterExpr::eq("user_name", name));
        let age_filter = age.map(|age| FilterExpr::eq("age", age));

        let composed = match (name_filter, age_filter) {
            // No criteria supplied: return everything, filtering nothing.
            (None, None) => None,
            (Some(expr), other) => Some(expr.and_option(other)),
            (None, Some(expr)) => Some(expr),
        };

        self.db.load::<Member>().filter_opt(composed).entities()
    }
}
