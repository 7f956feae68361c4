/// A declared unique or secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Explicit index name. Defaults to `<table>_<field>_<field>...`.
    pub name: Option<String>,

    /// Indexed field names, in order
    pub fields: Vec<String>,
}

impl Index {
    pub fn new(fields: &[&str]) -> Index {
        Index {
            name: None,
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }

    pub fn named(name: impl Into<String>, fields: &[&str]) -> Index {
        Index {
            name: Some(name.into()),
            ..Index::new(fields)
        }
    }
}
