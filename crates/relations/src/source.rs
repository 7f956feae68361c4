mod connect;

mod exec;

mod hooks;

mod retrieve;
pub use retrieve::Retrieved;

use crate::{Config, Result};

use relations_core::{
    schema::{Model, Relation},
    Connection, Instance, Schema,
};
use relations_sql::Serializer;
use std::sync::Arc;

/// A named PostgreSQL source.
///
/// Owns the connection its statements run on and the catalog of models
/// bound to it. Statements run one at a time, in call order.
#[derive(Debug)]
pub struct Source {
    name: String,

    /// Target database.
    database: String,

    /// Schema qualifying tables whose model declares none.
    schema: Option<String>,

    connection: Box<dyn Connection>,

    /// True when the source opened `connection` itself and so must close
    /// it.
    created: bool,

    catalog: Schema,
}

impl Source {
    /// Wraps a connection opened by the caller.
    ///
    /// The source never closes it; [`Source::close`] hands it back.
    pub fn new(
        name: impl Into<String>,
        database: impl Into<String>,
        connection: Box<dyn Connection>,
    ) -> Source {
        Source {
            name: name.into(),
            database: database.into(),
            schema: None,
            connection,
            created: false,
            catalog: Schema::default(),
        }
    }

    /// Opens a connection described by `config`. The source owns it.
    pub fn connect(config: &Config) -> Result<Source> {
        let connection = connect::connect(&config.url, &config.database)?;

        tracing::info!(
            source = %config.name,
            database = %config.database,
            "opened source"
        );

        Ok(Source {
            name: config.name.clone(),
            database: config.database.clone(),
            schema: config.schema.clone(),
            connection,
            created: true,
            catalog: Schema::default(),
        })
    }

    /// Hands the connection's lifetime to the source, so that
    /// [`Source::close`] closes it.
    pub fn owned(mut self) -> Source {
        self.created = true;
        self
    }

    /// Builder setting the default schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Source {
        self.schema = Some(schema.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn connection(&mut self) -> &mut dyn Connection {
        self.connection.as_mut()
    }

    /// Releases the connection.
    ///
    /// An owned connection is closed. A connection supplied by the caller is
    /// returned untouched.
    pub fn close(self) -> Result<Option<Box<dyn Connection>>> {
        tracing::info!(source = %self.name, created = self.created, "closing source");

        if self.created {
            self.connection.close()?;
            Ok(None)
        } else {
            Ok(Some(self.connection))
        }
    }

    /// Binds a model to this source, applying [`Source::model_init`], and
    /// adds it to the catalog.
    pub fn register(&mut self, mut model: Model) -> Arc<Model> {
        self.model_init(&mut model);
        self.catalog.register(model)
    }

    /// Declares a relation between two registered models.
    pub fn relate(&mut self, relation: Relation) -> Result<&Relation> {
        self.catalog.relate(relation)
    }

    pub fn catalog(&self) -> &Schema {
        &self.catalog
    }

    /// A registered model by name.
    pub fn model(&self, name: &str) -> Result<Arc<Model>> {
        self.catalog.model(name).cloned()
    }

    /// A fresh, unsaved instance of a registered model.
    pub fn instance(&self, model: &str) -> Result<Instance> {
        Ok(Instance::new(self.catalog.model(model)?))
    }

    fn serializer(&self) -> Serializer<'_> {
        Serializer::postgresql(self.schema.as_deref())
    }
}
