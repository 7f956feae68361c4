use super::{Formatter, ToSql};

use relations_core::stmt::Value;

/// Collects bound values while a statement is serialized.
pub trait Params {
    /// Stores a value, returning its 1-based position.
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// A positional parameter, rendered as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "$", self.0);
    }
}

/// A value bound as a parameter at the point it is serialized.
pub(super) struct Param<'a>(pub(super) &'a Value);

impl ToSql for Param<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.0);
        fmt!(f, placeholder);
    }
}
