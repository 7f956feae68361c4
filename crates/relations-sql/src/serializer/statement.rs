use super::{Comma, Delimited, Ident, Param, Params, Serializer, ToSql};

use relations_core::{schema::Model, stmt::Value};

impl Serializer<'_> {
    /// `INSERT INTO`, returning the generated column when one is named.
    pub fn insert<P: Params>(
        &self,
        model: &Model,
        columns: &[&str],
        values: &[Value],
        returning: Option<&str>,
        params: &mut P,
    ) -> String {
        self.fragment(params, |f| {
            fmt!(f, "INSERT INTO ", self.table_name(model));

            if columns.is_empty() {
                fmt!(f, " DEFAULT VALUES");
            } else {
                fmt!(
                    f,
                    " (",
                    Comma(columns.iter().map(Ident)),
                    ") VALUES (",
                    Comma(values.iter().map(Param)),
                    ")"
                );
            }

            if let Some(column) = returning {
                fmt!(f, " RETURNING ", Ident(column));
            }
        })
    }

    /// `UPDATE .. SET`, with already rendered assignments and predicates.
    pub fn update(&self, model: &Model, assignments: &[String], wheres: &[String]) -> String {
        self.text(|f| {
            fmt!(
                f,
                "UPDATE ",
                self.table_name(model),
                " SET ",
                Comma(assignments)
            );
            where_clause(f, wheres);
        })
    }

    /// `DELETE FROM`, with already rendered predicates.
    pub fn delete(&self, model: &Model, wheres: &[String]) -> String {
        self.text(|f| {
            fmt!(f, "DELETE FROM ", self.table_name(model));
            where_clause(f, wheres);
        })
    }
}

fn where_clause<P: Params>(f: &mut super::Formatter<'_, P>, wheres: &[String]) {
    if !wheres.is_empty() {
        fmt!(f, " WHERE ", Delimited(wheres, " AND "));
    }
}
