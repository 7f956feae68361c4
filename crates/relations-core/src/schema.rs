mod field;
pub use field::{Field, FieldDefault, FieldTy};

mod index;
pub use index::Index;

mod model;
pub use model::{Definition, Model};

mod relation;
pub use relation::{Relation, RelationKind};

use crate::{Error, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Catalog of registered models and the relations between them.
#[derive(Debug, Default)]
pub struct Schema {
    models: IndexMap<String, Arc<Model>>,
    relations: Vec<Relation>,
}

impl Schema {
    /// Registers a model, applying the declaration defaults (unique key,
    /// titles). Registering a name twice replaces the earlier model.
    pub fn register(&mut self, mut model: Model) -> Arc<Model> {
        model.prepare();
        let model = Arc::new(model);
        self.models.insert(model.name.clone(), model.clone());
        model
    }

    /// Declares a relation between two registered models, resolving the
    /// default key fields: the parent's id and `<parent table>_id` on the
    /// child.
    pub fn relate(&mut self, mut relation: Relation) -> Result<&Relation> {
        let parent = self.model(&relation.parent)?;
        let child = self.model(&relation.child)?;

        if relation.parent_field.is_none() {
            let Some(id) = parent.id_field() else {
                return Err(Error::invalid_schema(format!(
                    "relation parent `{}` has no primary key",
                    parent.name
                )));
            };
            relation.parent_field = Some(id.name.clone());
        }

        if relation.child_field.is_none() {
            relation.child_field = Some(format!("{}_id", parent.table_name()));
        }

        parent.field_named(relation.parent_field())?;
        child.field_named(relation.child_field())?;

        self.relations.push(relation);
        Ok(&self.relations[self.relations.len() - 1])
    }

    /// Gets a registered model by name.
    pub fn model(&self, name: &str) -> Result<&Arc<Model>> {
        self.models
            .get(name)
            .ok_or_else(|| Error::invalid_schema(format!("unknown model `{name}`")))
    }

    pub fn models(&self) -> impl Iterator<Item = &Arc<Model>> {
        self.models.values()
    }

    /// Relations in which `child` is the child model.
    pub fn parents<'a>(&'a self, child: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.child == child)
    }

    /// Relations in which `parent` is the parent model.
    pub fn children<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.parent == parent)
    }

    /// Gets the relation linking `parent` to `child`.
    pub fn relation(&self, parent: &str, child: &str) -> Result<&Relation> {
        self.relations
            .iter()
            .find(|r| r.parent == parent && r.child == child)
            .ok_or_else(|| {
                Error::invalid_schema(format!("no relation from `{parent}` to `{child}`"))
            })
    }
}
