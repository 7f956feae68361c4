use super::Source;
use crate::Result;

use indexmap::IndexMap;
use relations_core::{
    schema::{Relation, RelationKind},
    stmt::{Query, Value},
    Action, Error, Instance,
};

impl Source {
    /// Runs the DDL of a registered model.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn define(&mut self, model: &str) -> Result<()> {
        let model = self.model(model)?;
        for statement in self.model_define(&model) {
            self.execute(&statement, &[])?;
        }
        Ok(())
    }

    /// Inserts an instance, then its attached children.
    ///
    /// A generated key is written back onto the instance and copied into
    /// each child's foreign key before the child is written. Afterwards the
    /// instance represents a persisted row.
    #[tracing::instrument(level = "debug", skip(self, instance), fields(model = %instance.model().name))]
    pub fn create(&mut self, instance: &mut Instance) -> Result<()> {
        let model = instance.model().clone();
        self.check_attached(instance)?;

        let mut columns = vec![];
        let mut values = vec![];
        for (field, slot) in model.fields.iter().zip(instance.record.slots_mut()) {
            self.field_create(field, slot, &mut columns, &mut values);
        }

        let serial = model.serial_index();
        let returning = serial.map(|index| model.fields[index].storage_name());
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();

        let mut params = vec![];
        let sql = self
            .serializer()
            .insert(&model, &columns, &values, returning, &mut params);

        match (serial, returning) {
            (Some(index), Some(column)) => {
                let rows = self.query(&sql, &params)?;
                let key = rows
                    .first()
                    .and_then(|row| row.get(column))
                    .cloned()
                    .unwrap_or_default();

                let slot = &mut instance.record.slots_mut()[index];
                slot.value = key;
                slot.changed = false;
            }
            _ => {
                self.execute(&sql, &params)?;
            }
        }

        instance.mark_persisted();
        self.cascade(instance)
    }

    /// Inserts each instance in turn.
    #[tracing::instrument(level = "debug", skip(self, instances), fields(count = instances.len()))]
    pub fn create_all(&mut self, instances: &mut [Instance]) -> Result<()> {
        for instance in instances {
            self.create(instance)?;
        }
        Ok(())
    }

    /// Writes an instance's changed fields to its row, then cascades to its
    /// attached children: unsaved ones are created and persisted ones
    /// updated.
    ///
    /// Returns the number of rows the instance's own UPDATE affected, zero
    /// when only children had changes. An instance that was never created
    /// is refused and left untouched.
    #[tracing::instrument(level = "debug", skip(self, instance), fields(model = %instance.model().name))]
    pub fn update(&mut self, instance: &mut Instance) -> Result<u64> {
        let model = instance.model().clone();

        let Some(id) = model.id_field() else {
            return Err(Error::missing_primary_key(model.table_name(), "update"));
        };

        if instance.action == Action::Create {
            return Err(Error::record_not_persisted(model.table_name()));
        }

        self.check_attached(instance)?;

        let mut params = vec![];
        let mut clauses = vec![];
        for (field, slot) in model.fields.iter().zip(instance.record.slots_mut()) {
            self.field_update(field, slot, &mut clauses, &mut params, true);
        }

        if clauses.is_empty() && !instance.has_children() {
            return Err(Error::nothing_to_update(model.table_name()));
        }

        let mut count = 0;
        if !clauses.is_empty() {
            let key = instance.get(&id.name)?.clone();
            let wheres = [self.serializer().assignment(id.storage_name(), &key, &mut params)];
            let sql = self.serializer().update(&model, &clauses, &wheres);
            count = self.execute(&sql, &params)?;
        }

        instance.mark_persisted();
        self.cascade(instance)?;

        Ok(count)
    }

    /// Sets `values`, keyed by field name, on every row matching `query`.
    #[tracing::instrument(level = "debug", skip(self, query, values))]
    pub fn update_where(
        &mut self,
        model: &str,
        query: &Query,
        values: IndexMap<String, Value>,
    ) -> Result<u64> {
        let model = self.model(model)?;

        if model.id_field().is_none() {
            return Err(Error::missing_primary_key(model.table_name(), "update"));
        }

        let mut params = vec![];
        let mut clauses = vec![];
        for (name, value) in values {
            let field = model.field_named(&name)?;
            if field.readonly {
                continue;
            }
            let value = relations_sql::encode_field(field, value);
            clauses.push(
                self.serializer()
                    .assignment(field.storage_name(), &value, &mut params),
            );
        }

        if clauses.is_empty() {
            return Err(Error::nothing_to_update(model.table_name()));
        }

        let (template, _) = self.compile(&model, query, &mut params)?;
        let sql = self.serializer().update(&model, &clauses, &template.wheres);
        self.execute(&sql, &params)
    }

    /// Deletes an instance's row, after deleting the rows of its attached
    /// children.
    #[tracing::instrument(level = "debug", skip(self, instance), fields(model = %instance.model().name))]
    pub fn delete(&mut self, instance: &mut Instance) -> Result<u64> {
        let model = instance.model().clone();

        let Some(id) = model.id_field() else {
            return Err(Error::missing_primary_key(model.table_name(), "delete"));
        };

        self.delete_children(instance)?;

        let mut params = vec![];
        let key = instance.get(&id.name)?.clone();
        let wheres = [self.serializer().assignment(id.storage_name(), &key, &mut params)];
        let sql = self.serializer().delete(&model, &wheres);
        self.execute(&sql, &params)
    }

    /// Deletes every row matching `query`.
    #[tracing::instrument(level = "debug", skip(self, query))]
    pub fn delete_where(&mut self, model: &str, query: &Query) -> Result<u64> {
        let model = self.model(model)?;

        if model.id_field().is_none() {
            return Err(Error::missing_primary_key(model.table_name(), "delete"));
        }

        let mut params = vec![];
        let (template, _) = self.compile(&model, query, &mut params)?;
        let sql = self.serializer().delete(&model, &template.wheres);
        self.execute(&sql, &params)
    }

    /// Writes the attached children of a persisted instance, copying its key
    /// into their foreign keys first.
    fn cascade(&mut self, instance: &mut Instance) -> Result<()> {
        let parent = instance.model().name.clone();
        let relations = self.child_relations(&parent);

        for relation in &relations {
            let key = instance.get(relation.parent_field())?.clone();

            for (name, group) in instance.child_groups_mut() {
                if name != relation.child {
                    continue;
                }

                for child in group.iter_mut() {
                    if child.get(relation.child_field())? != &key {
                        child.set(relation.child_field(), key.clone())?;
                    }

                    match child.action {
                        Action::Create => self.create(child)?,
                        Action::Update => {
                            if child.record.is_changed() || child.has_children() {
                                self.update(child)?;
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Deletes the rows of every attached child group, deepest first.
    fn delete_children(&mut self, instance: &mut Instance) -> Result<()> {
        let parent = instance.model().name.clone();
        let relations = self.child_relations(&parent);

        for relation in &relations {
            let key = instance.get(relation.parent_field())?.clone();

            let mut attached = false;
            for (name, group) in instance.child_groups_mut() {
                if name != relation.child {
                    continue;
                }
                attached = true;
                for child in group.iter_mut() {
                    self.delete_children(child)?;
                }
            }

            if !attached || key.is_null() {
                continue;
            }

            let child = self.model(&relation.child)?;
            let mut params = vec![];
            let column = child.field_named(relation.child_field())?.storage_name();
            let wheres = [self.serializer().assignment(column, &key, &mut params)];
            let sql = self.serializer().delete(&child, &wheres);
            self.execute(&sql, &params)?;
        }

        Ok(())
    }

    /// Fails when attached children do not fit their relation: a one-to-one
    /// relation holds at most one child. Checked at every depth before
    /// anything is written.
    fn check_attached(&self, instance: &Instance) -> Result<()> {
        let parent = &instance.model().name;

        for (name, group) in instance.child_groups() {
            let relation = self.catalog.relation(parent, name)?;
            if relation.kind == RelationKind::OneToOne && group.len() > 1 {
                return Err(Error::invalid_schema(format!(
                    "`{parent}` has one `{name}`, {} attached",
                    group.len()
                )));
            }

            for child in group {
                self.check_attached(child)?;
            }
        }

        Ok(())
    }

    fn child_relations(&self, parent: &str) -> Vec<Relation> {
        self.catalog.children(parent).cloned().collect()
    }
}
