use super::{Comma, Ident, Param, Params, Serializer, ToSql};

use relations_core::stmt::{Filter, Op, Value};

impl Serializer<'_> {
    /// Renders one field's filter as a WHERE fragment, binding its values.
    ///
    /// Membership binds one placeholder per member. An empty membership
    /// list matches nothing and an empty exclusion list matches everything.
    pub fn filter<P: Params>(&self, column: &str, filter: &Filter, params: &mut P) -> String {
        self.fragment(params, |f| match filter.op {
            Op::In | Op::NotIn if filter.value.members().is_empty() => {
                fmt!(f, if filter.op == Op::In { "FALSE" } else { "TRUE" })
            }
            Op::In => fmt!(
                f,
                Ident(column),
                " IN (",
                Comma(filter.value.members().iter().map(Param)),
                ")"
            ),
            Op::NotIn => fmt!(
                f,
                Ident(column),
                " NOT IN (",
                Comma(filter.value.members().iter().map(Param)),
                ")"
            ),
            Op::Like => {
                let pattern = Value::String(format!("%{}%", text_form(&filter.value)));
                fmt!(f, Ident(column), "::varchar(255) ILIKE ", Param(&pattern))
            }
            Op::Gt => fmt!(f, Ident(column), ">", Param(&filter.value)),
            Op::Gte => fmt!(f, Ident(column), ">=", Param(&filter.value)),
            Op::Lt => fmt!(f, Ident(column), "<", Param(&filter.value)),
            Op::Lte => fmt!(f, Ident(column), "<=", Param(&filter.value)),
            Op::Eq => fmt!(f, Ident(column), "=", Param(&filter.value)),
        })
    }

    /// `"col"=$n`, used by both SET lists and equality predicates.
    pub fn assignment<P: Params>(&self, column: &str, value: &Value, params: &mut P) -> String {
        self.fragment(params, |f| fmt!(f, Ident(column), "=", Param(value)))
    }

    /// `"col" IN ($1,...)` over a list of ids.
    pub fn membership<P: Params>(&self, column: &str, ids: &[Value], params: &mut P) -> String {
        self.filter(column, &Filter::new(column, Op::In, ids.to_vec()), params)
    }
}

fn text_form(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::List(_) | Value::Map(_) => value.to_json().to_string(),
    }
}
