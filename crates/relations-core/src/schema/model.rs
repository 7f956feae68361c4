use super::{Field, FieldTy, Index};
use crate::{stmt::QueryTemplate, Error, Result};

/// Raw DDL replacing the generated table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Statement(String),
    Statements(Vec<String>),
}

impl Definition {
    pub fn statements(&self) -> Vec<String> {
        match self {
            Definition::Statement(stmt) => vec![stmt.clone()],
            Definition::Statements(stmts) => stmts.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model
    pub name: String,

    /// Table name. Derived from the model name when the model is
    /// initialized by a source.
    pub table: Option<String>,

    /// Schema owning the table, overriding the source's schema
    pub schema: Option<String>,

    pub database: Option<String>,

    /// Fields, in column order
    pub fields: Vec<Field>,

    /// Name of the primary field. `None` declares a model without identity:
    /// it can be created but never individually updated or deleted.
    pub id: Option<String>,

    /// Unique indexes
    pub unique: Vec<Index>,

    /// Secondary indexes
    pub index: Vec<Index>,

    /// Display fields, used for the default sort and `like` matching
    pub titles: Vec<String>,

    pub definition: Option<Definition>,

    /// Cached `SELECT * FROM <table>` template
    pub query: QueryTemplate,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            table: None,
            schema: None,
            database: None,
            fields: vec![],
            id: Some("id".to_string()),
            unique: vec![],
            index: vec![],
            titles: vec![],
            definition: None,
            query: QueryTemplate::default(),
        }
    }

    pub fn field(mut self, field: Field) -> Model {
        self.fields.push(field);
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Model {
        self.table = Some(table.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Model {
        self.schema = Some(schema.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Model {
        self.database = Some(database.into());
        self
    }

    pub fn id(mut self, field: impl Into<String>) -> Model {
        self.id = Some(field.into());
        self
    }

    pub fn no_id(mut self) -> Model {
        self.id = None;
        self
    }

    pub fn unique(mut self, index: Index) -> Model {
        self.unique.push(index);
        self
    }

    pub fn index(mut self, index: Index) -> Model {
        self.index.push(index);
        self
    }

    pub fn titles(mut self, titles: &[&str]) -> Model {
        self.titles = titles.iter().map(|title| title.to_string()).collect();
        self
    }

    pub fn definition(mut self, definition: Definition) -> Model {
        self.definition = Some(definition);
        self
    }

    /// The table name, falling back to the model name before
    /// initialization.
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(&self.name)
    }

    /// Gets a field by name.
    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Gets a field by name, failing for undeclared names.
    pub fn field_named(&self, name: &str) -> Result<&Field> {
        self.find_field(name).ok_or_else(|| {
            Error::invalid_schema(format!("`{}` has no field `{name}`", self.name))
        })
    }

    /// Position of a field, failing for undeclared names.
    pub fn field_index(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| {
                Error::invalid_schema(format!("`{}` has no field `{name}`", self.name))
            })
    }

    /// The primary field, if the model declares one.
    pub fn id_field(&self) -> Option<&Field> {
        self.id.as_deref().and_then(|id| self.find_field(id))
    }

    /// Position of the auto-incremented field, if any.
    pub fn serial_index(&self) -> Option<usize> {
        self.fields.iter().position(|field| field.serial)
    }

    /// Applies declaration defaults.
    ///
    /// Without a declared unique index, the first text field other than the
    /// id becomes unique. Unique fields are not nullable. Without declared
    /// titles, the first unique index supplies them.
    pub(crate) fn prepare(&mut self) {
        if self.id_field().is_none() {
            self.id = None;
        }

        if self.unique.is_empty() {
            let id = self.id.clone();
            if let Some(field) = self
                .fields
                .iter()
                .find(|field| field.ty == FieldTy::Text && Some(&field.name) != id.as_ref())
            {
                self.unique.push(Index::new(&[field.name.as_str()]));
            }
        }

        for index in &self.unique {
            for name in &index.fields {
                if let Some(field) = self.fields.iter_mut().find(|field| &field.name == name) {
                    field.nullable = false;
                }
            }
        }

        if self.titles.is_empty() {
            if let Some(index) = self.unique.first() {
                self.titles = index.fields.clone();
            }
        }
    }
}
