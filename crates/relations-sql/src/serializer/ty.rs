use super::{Formatter, Params, ToSql};

use relations_core::schema::{Field, FieldTy};

/// VARCHAR length used when a text field declares none.
pub const DEFAULT_TEXT_LENGTH: usize = 255;

/// The column type of a field.
pub(super) struct ColumnType<'a>(pub(super) &'a Field);

impl ToSql for ColumnType<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let field = self.0;

        match field.ty {
            FieldTy::Bool => fmt!(f, "BOOLEAN"),
            FieldTy::Int if field.serial && field.primary_key => fmt!(f, "SERIAL"),
            FieldTy::Int => fmt!(f, "INT"),
            FieldTy::Float => fmt!(f, "FLOAT"),
            FieldTy::Text => fmt!(
                f,
                "VARCHAR(",
                field.length.unwrap_or(DEFAULT_TEXT_LENGTH),
                ")"
            ),
            FieldTy::List | FieldTy::Map => fmt!(f, "JSON"),
        }
    }
}
