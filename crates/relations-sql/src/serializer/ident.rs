use super::{Formatter, Params, ToSql};

/// A double-quoted SQL identifier.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('"');
        for ch in self.0.as_ref().chars() {
            if ch == '"' {
                f.dst.push('"');
            }
            f.dst.push(ch);
        }
        f.dst.push('"');
    }
}

/// `"schema"."table"`, or `"table"` without a schema.
pub(super) struct TableName<'a> {
    pub(super) schema: Option<&'a str>,
    pub(super) table: &'a str,
}

impl ToSql for TableName<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(schema) = self.schema {
            fmt!(f, Ident(schema), ".");
        }
        fmt!(f, Ident(self.table));
    }
}
