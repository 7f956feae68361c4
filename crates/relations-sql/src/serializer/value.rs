use super::{Formatter, Params, ToSql};

use relations_core::stmt::Value;

/// A value rendered inline as a SQL literal, for `DEFAULT` clauses.
pub(super) struct Literal<'a>(pub(super) &'a Value);

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        match self.0 {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(true) => fmt!(f, "TRUE"),
            Value::Bool(false) => fmt!(f, "FALSE"),
            Value::I64(v) => {
                let _ = write!(f.dst, "{v}");
            }
            Value::F64(v) => {
                let _ = write!(f.dst, "{v}");
            }
            Value::String(v) => quoted(v, f),
            Value::List(_) | Value::Map(_) => quoted(&self.0.to_json().to_string(), f),
        }
    }
}

fn quoted<P: Params>(text: &str, f: &mut Formatter<'_, P>) {
    f.dst.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            f.dst.push('\'');
        }
        f.dst.push(ch);
    }
    f.dst.push('\'');
}
