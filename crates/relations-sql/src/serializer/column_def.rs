use super::{ColumnType, Ident, Literal, Serializer, ToSql};

use relations_core::schema::{Field, FieldDefault};

impl Serializer<'_> {
    /// Renders one column definition.
    ///
    /// A raw definition on the field is emitted verbatim. Otherwise the
    /// column is `NOT NULL` when it refuses null or carries any default,
    /// gets a `DEFAULT` literal only for static defaults, and is marked
    /// `PRIMARY KEY` for primary key fields. Sequence and mapping fields
    /// without a default default to their empty collection.
    pub fn column_def(&self, field: &Field) -> String {
        if let Some(definition) = &field.definition {
            return definition.clone();
        }

        let default = field.default.clone().or_else(|| {
            field
                .ty
                .empty_collection()
                .map(FieldDefault::Static)
        });

        self.text(|f| {
            fmt!(f, Ident(field.storage_name()), " ", ColumnType(field));

            if !field.nullable || default.is_some() {
                fmt!(f, " NOT NULL");
            }

            if let Some(value) = default.as_ref().and_then(FieldDefault::as_static) {
                fmt!(f, " DEFAULT ", Literal(value));
            }

            if field.primary_key {
                fmt!(f, " PRIMARY KEY");
            }
        })
    }
}
