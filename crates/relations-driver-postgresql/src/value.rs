use postgres::types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use relations_core::stmt::Value as CoreValue;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            // Structured columns take JSON whether the value arrives encoded
            // as text or still as a list or map.
            value if *ty == Type::JSON || *ty == Type::JSONB => json(value)?.to_sql(ty, out),
            CoreValue::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                _ => text(value.to_string(), ty, out),
            },
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                _ => text(value.to_string(), ty, out),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                _ => text(value.to_string(), ty, out),
            },
            CoreValue::String(value) => text(value.clone(), ty, out),
            CoreValue::List(_) | CoreValue::Map(_) => text(self.0.to_json().to_string(), ty, out),
        }
    }

    accepts!(BOOL, INT2, INT4, INT8, FLOAT4, FLOAT8, TEXT, VARCHAR, BPCHAR, JSON, JSONB);
    to_sql_checked!();
}

/// Binds the text form of a value, which only text parameters accept.
fn text(value: String, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_sql(ty, out),
        _ => Err(format!("cannot bind `{value}` to a parameter of type `{ty}`").into()),
    }
}

fn json(value: &CoreValue) -> Result<serde_json::Value, BoxError> {
    Ok(match value {
        CoreValue::String(text) => serde_json::from_str(text)?,
        value => value.to_json(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: CoreValue, ty: &Type) -> Vec<u8> {
        let mut out = BytesMut::new();
        Value::from(value).to_sql(ty, &mut out).unwrap();
        out.to_vec()
    }

    #[test]
    fn integers_narrow_to_the_column() {
        assert_eq!(encode(CoreValue::I64(7), &Type::INT4), 7i32.to_be_bytes());
        assert_eq!(encode(CoreValue::I64(7), &Type::INT8), 7i64.to_be_bytes());
    }

    #[test]
    fn out_of_range_integers_fail() {
        let mut out = BytesMut::new();
        assert!(Value::from(CoreValue::I64(i64::MAX))
            .to_sql(&Type::INT4, &mut out)
            .is_err());
    }

    #[test]
    fn encoded_json_text_is_bound_as_json() {
        assert_eq!(
            encode(CoreValue::from("[1,2]"), &Type::JSON),
            encode(CoreValue::from(vec![1, 2]), &Type::JSON)
        );
    }

    #[test]
    fn text_form_only_binds_to_text() {
        assert_eq!(encode(CoreValue::I64(7), &Type::TEXT), b"7");
        assert_eq!(encode(CoreValue::Bool(true), &Type::VARCHAR), b"true");

        let mut out = BytesMut::new();
        let err = Value::from(CoreValue::I64(1))
            .to_sql(&Type::BOOL, &mut out)
            .err().unwrap();
        assert_eq!(err.to_string(), "cannot bind `1` to a parameter of type `bool`");

        assert!(Value::from(CoreValue::from("yes"))
            .to_sql(&Type::INT4, &mut out)
            .is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn null_is_null() {
        let mut out = BytesMut::new();
        assert!(matches!(
            Value::from(CoreValue::Null).to_sql(&Type::INT8, &mut out),
            Ok(IsNull::Yes)
        ));
    }
}
