use crate::{driver::Row, schema::Model, stmt::Value, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Lifecycle state of an instance or record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Not yet persisted; the next write is an INSERT.
    #[default]
    Create,

    /// Represents a persisted row; the next write is an UPDATE.
    Update,
}

/// One field's value and whether it differs from the last persisted value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    pub value: Value,
    pub changed: bool,
}

/// The field values of one row, positional with the model's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    slots: Vec<Slot>,
    pub action: Action,
}

impl Record {
    pub fn new(len: usize) -> Record {
        Record {
            slots: vec![Slot::default(); len],
            action: Action::Create,
        }
    }

    /// Builds a persisted record from a result row. Columns absent from the
    /// row read as null.
    pub fn from_row(model: &Model, row: &Row) -> Record {
        let slots = model
            .fields
            .iter()
            .map(|field| Slot {
                value: row.get(field.storage_name()).cloned().unwrap_or_default(),
                changed: false,
            })
            .collect();

        Record {
            slots,
            action: Action::Update,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    pub fn value(&self, index: usize) -> &Value {
        &self.slots[index].value
    }

    /// Sets a value and marks it changed.
    pub fn set(&mut self, index: usize, value: Value) {
        let slot = &mut self.slots[index];
        slot.value = value;
        slot.changed = true;
    }

    /// True if any slot differs from its persisted value.
    pub fn is_changed(&self) -> bool {
        self.slots.iter().any(|slot| slot.changed)
    }
}

/// An in-memory model instance with its attached, owned children.
///
/// Children are grouped by child model name. They hold no reference back
/// to the parent; the parent's key is copied into their foreign key field
/// when the parent is written.
#[derive(Debug, Clone)]
pub struct Instance {
    model: Arc<Model>,
    pub record: Record,
    pub action: Action,
    children: IndexMap<String, Vec<Instance>>,
}

impl Instance {
    pub fn new(model: &Arc<Model>) -> Instance {
        Instance {
            model: model.clone(),
            record: Record::new(model.fields.len()),
            action: Action::Create,
            children: IndexMap::new(),
        }
    }

    /// Builds a persisted instance from a result row.
    pub fn materialize(model: &Arc<Model>, row: &Row) -> Instance {
        Instance {
            model: model.clone(),
            record: Record::from_row(model, row),
            action: Action::Update,
            children: IndexMap::new(),
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Gets a field's value by field name.
    pub fn get(&self, name: &str) -> Result<&Value> {
        let index = self.model.field_index(name)?;
        Ok(self.record.value(index))
    }

    /// The primary key value, if the model declares one.
    pub fn id(&self) -> Option<&Value> {
        let id = self.model.id.as_deref()?;
        let index = self.model.field_index(id).ok()?;
        Some(self.record.value(index))
    }

    /// Sets a field's value by field name, marking it changed.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self.model.field_index(name)?;
        self.record.set(index, value.into());
        Ok(())
    }

    /// Builder form of [`set`](Instance::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Instance> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Attaches a child instance and returns it for further nesting.
    pub fn add(&mut self, child: Instance) -> &mut Instance {
        let group = self.children.entry(child.model.name.clone()).or_default();
        group.push(child);
        let last = group.len() - 1;
        &mut group[last]
    }

    /// Attached children of the given child model.
    pub fn children(&self, model: &str) -> &[Instance] {
        self.children.get(model).map(Vec::as_slice).unwrap_or_default()
    }

    /// True if any child is attached.
    pub fn has_children(&self) -> bool {
        self.children.values().any(|group| !group.is_empty())
    }

    /// Replaces the attached children of the given child model.
    pub fn set_children(&mut self, model: &str, children: Vec<Instance>) {
        self.children.insert(model.to_string(), children);
    }

    /// Every attached child group, by child model name.
    pub fn child_groups(&self) -> impl Iterator<Item = (&str, &[Instance])> {
        self.children
            .iter()
            .map(|(name, group)| (name.as_str(), group.as_slice()))
    }

    pub fn child_groups_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Instance>)> {
        self.children
            .iter_mut()
            .map(|(name, group)| (name.as_str(), group))
    }

    /// Marks the instance and its record as persisted.
    pub fn mark_persisted(&mut self) {
        self.action = Action::Update;
        self.record.action = Action::Update;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, Schema};

    fn unit() -> Arc<Model> {
        let mut schema = Schema::default();
        schema.register(
            Model::new("Unit")
                .field(Field::int("id"))
                .field(Field::text("name").store("_name")),
        )
    }

    #[test]
    fn set_marks_changed() {
        let model = unit();
        let mut unit = Instance::new(&model);
        assert!(!unit.record.is_changed());

        unit.set("name", "people").unwrap();
        assert_eq!(unit.get("name").unwrap(), &Value::from("people"));
        assert!(unit.record.slots()[1].changed);
        assert_eq!(unit.action, Action::Create);

        assert!(unit.set("nope", 1).unwrap_err().is_invalid_schema());
    }

    #[test]
    fn materialize_reads_storage_names() {
        let model = unit();
        let row = Row::new().with("id", 2).with("_name", "people");
        let unit = Instance::materialize(&model, &row);

        assert_eq!(unit.id(), Some(&Value::I64(2)));
        assert_eq!(unit.get("name").unwrap(), &Value::from("people"));
        assert_eq!(unit.action, Action::Update);
        assert_eq!(unit.record.action, Action::Update);
        assert!(!unit.record.is_changed());
    }

    #[test]
    fn children_are_grouped_by_model() {
        let model = unit();
        let mut parent = Instance::new(&model);
        parent.add(Instance::new(&model)).set("name", "a").unwrap();
        parent.add(Instance::new(&model));

        assert_eq!(parent.children("Unit").len(), 2);
        assert!(parent.children("Test").is_empty());
    }
}
