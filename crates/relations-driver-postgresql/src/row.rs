use postgres::types::Type;
use relations_core::{driver, stmt::Value, Error, Result};

/// Decodes one result row, keyed by column name.
pub(crate) fn decode(row: &postgres::Row) -> Result<driver::Row> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(index, column)| Ok((column.name(), value(row, index, column.type_())?)))
        .collect()
}

fn value(row: &postgres::Row, index: usize, ty: &Type) -> Result<Value> {
    // The type enum has no accessible representation; compare each in turn.
    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index).map(Value::from)
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map(|v| v.map(i64::from).into())
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index).map(Value::from)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index).map(Value::from)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)
            .map(|v| v.map(f64::from).into())
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index).map(Value::from)
    } else if *ty == Type::JSON || *ty == Type::JSONB {
        row.try_get::<_, Option<serde_json::Value>>(index)
            .map(Value::from)
    } else {
        row.try_get::<_, Option<String>>(index).map(Value::from)
    };

    value.map_err(Error::driver)
}
