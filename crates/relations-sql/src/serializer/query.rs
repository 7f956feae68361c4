use super::{Ident, Param, Params, Serializer, ToSql};

use relations_core::{
    schema::Model,
    stmt::{Direction, QueryTemplate, Value},
};

impl Serializer<'_> {
    /// The cached base query of a model: `SELECT * FROM <table>`.
    pub fn select(&self, model: &Model) -> QueryTemplate {
        QueryTemplate::new("*", self.table(model))
    }

    /// One ORDER BY term. Ascending is the default and is not spelled out.
    pub fn order_by(&self, column: &str, direction: Direction) -> String {
        self.text(|f| {
            fmt!(f, Ident(column));
            if direction == Direction::Desc {
                fmt!(f, " DESC");
            }
        })
    }

    /// The LIMIT clause body. An offset without a limit is ignored.
    pub fn limits<P: Params>(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
        params: &mut P,
    ) -> String {
        let Some(limit) = limit else {
            return String::new();
        };

        self.fragment(params, |f| {
            fmt!(f, Param(&bound(limit)));
            if let Some(offset) = offset {
                fmt!(f, " OFFSET ", Param(&bound(offset)));
            }
        })
    }

    /// `SELECT COUNT(*)` over the same table and predicate as `query`.
    pub fn count(&self, query: &QueryTemplate) -> String {
        let mut count = QueryTemplate::new("COUNT(*)", query.from.clone());
        count.wheres = query.wheres.clone();
        count.get()
    }
}

fn bound(n: u64) -> Value {
    Value::I64(i64::try_from(n).unwrap_or(i64::MAX))
}
