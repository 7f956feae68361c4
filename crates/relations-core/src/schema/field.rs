use crate::stmt::Value;

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Semantic type of a field.
///
/// Each variant maps to exactly one column type; the SQL side dispatches
/// on this enum rather than inspecting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTy {
    Bool,
    Int,
    Float,
    Text,
    /// Sequence, stored as JSON
    List,
    /// Mapping, stored as JSON
    Map,
}

impl FieldTy {
    /// True for the types stored as structured JSON text.
    pub fn is_structured(self) -> bool {
        matches!(self, FieldTy::List | FieldTy::Map)
    }

    /// The empty value of a structured type.
    pub fn empty_collection(self) -> Option<Value> {
        match self {
            FieldTy::List => Some(Value::List(vec![])),
            FieldTy::Map => Some(Value::Map(IndexMap::new())),
            _ => None,
        }
    }
}

/// Default applied to a field when a record is written without a value.
#[derive(Clone)]
pub enum FieldDefault {
    /// A literal, also rendered into the column's `DEFAULT` clause.
    Static(Value),

    /// Computed at write time, never rendered into DDL.
    Deferred(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FieldDefault {
    pub fn resolve(&self) -> Value {
        match self {
            FieldDefault::Static(value) => value.clone(),
            FieldDefault::Deferred(f) => f(),
        }
    }

    pub fn as_static(&self) -> Option<&Value> {
        match self {
            FieldDefault::Static(value) => Some(value),
            FieldDefault::Deferred(_) => None,
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Static(value) => f.debug_tuple("Static").field(value).finish(),
            FieldDefault::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    /// The field name
    pub name: String,

    /// Column name, when it differs from the field name
    pub store: Option<String>,

    pub ty: FieldTy,

    /// VARCHAR length for text fields
    pub length: Option<usize>,

    /// True if the column accepts NULL.
    pub nullable: bool,

    pub default: Option<FieldDefault>,

    /// True if the field is the primary key
    pub primary_key: bool,

    /// True if the column is an auto-incremented integer
    pub serial: bool,

    /// Read-only fields are never written by INSERT or UPDATE.
    pub readonly: bool,

    /// Replace fields are reset to their default on every update.
    pub replace: bool,

    /// Raw column definition, emitted verbatim by DDL generation
    pub definition: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldTy) -> Field {
        Field {
            name: name.into(),
            store: None,
            ty,
            length: None,
            nullable: true,
            default: None,
            primary_key: false,
            serial: false,
            readonly: false,
            replace: false,
            definition: None,
        }
    }

    pub fn bool(name: impl Into<String>) -> Field {
        Field::new(name, FieldTy::Bool)
    }

    pub fn int(name: impl Into<String>) -> Field {
        Field::new(name, FieldTy::Int)
    }

    pub fn float(name: impl Into<String>) -> Field {
        Field::new(name, FieldTy::Float)
    }

    pub fn text(name: impl Into<String>) -> Field {
        Field::new(name, FieldTy::Text)
    }

    pub fn list(name: impl Into<String>) -> Field {
        Field::new(name, FieldTy::List)
    }

    pub fn map(name: impl Into<String>) -> Field {
        Field::new(name, FieldTy::Map)
    }

    /// Name of the column backing this field.
    pub fn storage_name(&self) -> &str {
        self.store.as_deref().unwrap_or(&self.name)
    }

    pub fn store(mut self, store: impl Into<String>) -> Field {
        self.store = Some(store.into());
        self
    }

    pub fn length(mut self, length: usize) -> Field {
        self.length = Some(length);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Field {
        self.nullable = nullable;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Field {
        self.default = Some(FieldDefault::Static(value.into()));
        self
    }

    pub fn default_fn(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Field {
        self.default = Some(FieldDefault::Deferred(Arc::new(f)));
        self
    }

    pub fn primary_key(mut self) -> Field {
        self.primary_key = true;
        self
    }

    pub fn serial(mut self) -> Field {
        self.serial = true;
        self
    }

    pub fn readonly(mut self) -> Field {
        self.readonly = true;
        self
    }

    pub fn replace(mut self) -> Field {
        self.replace = true;
        self
    }

    pub fn definition(mut self, definition: impl Into<String>) -> Field {
        self.definition = Some(definition.into());
        self
    }
}
