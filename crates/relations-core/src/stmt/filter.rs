use super::Value;

/// Comparison applied by a field filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Equality, the default.
    Eq,

    /// Membership in a list of values.
    In,

    /// Exclusion from a list of values.
    NotIn,

    /// Case insensitive substring match on the text form of the column.
    Like,

    Gt,
    Gte,
    Lt,
    Lte,
}

impl Op {
    /// Parses the operator suffix of a `field__op` filter key.
    pub fn from_suffix(suffix: &str) -> Option<Op> {
        Some(match suffix {
            "eq" => Op::Eq,
            "in" => Op::In,
            "ne" | "not_in" => Op::NotIn,
            "like" => Op::Like,
            "gt" => Op::Gt,
            "gte" => Op::Gte,
            "lt" => Op::Lt,
            "lte" => Op::Lte,
            _ => return None,
        })
    }
}

/// A pending filter on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Name of the filtered field
    pub field: String,

    pub op: Op,

    /// Operand. Membership filters carry a [`Value::List`].
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Filter {
        Filter {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Builds a filter from a `field` or `field__op` key.
    pub fn parse(key: &str, value: impl Into<Value>) -> Filter {
        match key.rsplit_once("__") {
            Some((field, suffix)) => match Op::from_suffix(suffix) {
                Some(op) => Filter::new(field, op, value),
                None => Filter::new(key, Op::Eq, value),
            },
            None => Filter::new(key, Op::Eq, value),
        }
    }
}
