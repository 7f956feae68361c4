use super::{Delimited, Serializer, TableName, ToSql};

use relations_core::schema::Model;

impl Serializer<'_> {
    /// `CREATE TABLE IF NOT EXISTS` with one line per column.
    pub fn create_table(&self, model: &Model) -> String {
        let columns: Vec<String> = model
            .fields
            .iter()
            .map(|field| self.column_def(field))
            .collect();

        self.text(|f| {
            fmt!(
                f,
                "CREATE TABLE IF NOT EXISTS ",
                self.table_name(model),
                " (\n  ",
                Delimited(&columns, ",\n  "),
                "\n)"
            );
        })
    }

    pub(super) fn table_name<'a>(&'a self, model: &'a Model) -> TableName<'a> {
        TableName {
            schema: model.schema.as_deref().or(self.schema),
            table: model.table_name(),
        }
    }
}
