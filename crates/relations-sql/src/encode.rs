use indexmap::IndexMap;
use relations_core::{
    schema::{Field, Model},
    stmt::Value,
};

/// Prepares values keyed by storage name for binding.
///
/// List and map values of structured fields become JSON text. Null and
/// every other type pass through, as do keys no field stores to.
pub fn encode(model: &Model, values: IndexMap<String, Value>) -> IndexMap<String, Value> {
    values
        .into_iter()
        .map(|(column, value)| {
            let value = match model
                .fields
                .iter()
                .find(|field| field.storage_name() == column)
            {
                Some(field) => encode_field(field, value),
                None => value,
            };

            (column, value)
        })
        .collect()
}

/// Encodes a single value bound to `field`.
pub fn encode_field(field: &Field, value: Value) -> Value {
    match value {
        value @ (Value::List(_) | Value::Map(_)) if field.ty.is_structured() => {
            Value::String(value.to_json().to_string())
        }
        value => value,
    }
}
