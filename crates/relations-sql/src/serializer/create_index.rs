use super::{Comma, Ident, Serializer, ToSql};

use relations_core::schema::{Index, Model};

impl Serializer<'_> {
    /// `CREATE [UNIQUE] INDEX`, named `<table>_<fields>` unless the index
    /// carries a name.
    pub fn create_index(&self, model: &Model, index: &Index, unique: bool) -> String {
        let name = index
            .name
            .clone()
            .unwrap_or_else(|| format!("{}_{}", model.table_name(), index.fields.join("_")));

        let columns = index.fields.iter().map(|name| {
            Ident(
                model
                    .find_field(name)
                    .map(|field| field.storage_name())
                    .unwrap_or(name),
            )
        });

        let create = if unique {
            "CREATE UNIQUE INDEX "
        } else {
            "CREATE INDEX "
        };

        self.text(|f| {
            fmt!(
                f,
                create,
                Ident(&name),
                " ON ",
                self.table_name(model),
                " (",
                Comma(columns),
                ")"
            );
        })
    }

    /// All DDL for a model: the raw definition if declared, otherwise the
    /// table followed by its unique then secondary indexes.
    pub fn define_model(&self, model: &Model) -> Vec<String> {
        if let Some(definition) = &model.definition {
            return definition.statements();
        }

        let mut statements = vec![self.create_table(model)];
        statements.extend(
            model
                .unique
                .iter()
                .map(|index| self.create_index(model, index, true)),
        );
        statements.extend(
            model
                .index
                .iter()
                .map(|index| self.create_index(model, index, false)),
        );
        statements
    }
}
