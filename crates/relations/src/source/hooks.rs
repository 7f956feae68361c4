//! The per-field and per-model hooks a model framework calls at each
//! lifecycle point. Builders append to an accumulator and return nothing.

use super::Source;
use crate::Result;

use heck::ToSnakeCase;
use indexmap::IndexMap;
use relations_core::{
    record::Slot,
    schema::{Field, FieldDefault, FieldTy, Model},
    stmt::{Filter, Query, QueryTemplate, Sort, Value},
};

impl Source {
    /// Gives list and map fields without a default their empty collection
    /// as a static default.
    pub fn field_init(&self, field: &mut Field) {
        if field.default.is_none() {
            if let Some(empty) = field.ty.empty_collection() {
                field.default = Some(FieldDefault::Static(empty));
            }
        }
    }

    /// Applies source defaults to a model.
    ///
    /// The table defaults to the snake-cased model name. The id field
    /// becomes the primary key. An integer id without a raw definition is
    /// auto-incremented, and a serial id is read-only; other ids are written
    /// by INSERT like any field. The base query is cached on the model.
    pub fn model_init(&self, model: &mut Model) {
        if model.table.is_none() {
            model.table = Some(model.name.to_snake_case());
        }

        let id = model.id.clone();
        for field in &mut model.fields {
            if id.as_deref() == Some(field.name.as_str()) {
                field.primary_key = true;
                field.serial |= field.ty == FieldTy::Int && field.definition.is_none();
                field.readonly |= field.serial;
            }
            self.field_init(field);
        }

        model.query = self.serializer().select(model);
    }

    pub fn field_define(&self, field: &Field, definitions: &mut Vec<String>) {
        definitions.push(self.serializer().column_def(field));
    }

    /// DDL for a model: its raw definition, or the table and its indexes.
    pub fn model_define(&self, model: &Model) -> Vec<String> {
        self.serializer().define_model(model)
    }

    /// Adds a field to an INSERT.
    ///
    /// Read-only fields are skipped. A null value takes the field's default,
    /// resolved now for deferred defaults, and the slot keeps the value
    /// written.
    pub fn field_create(
        &self,
        field: &Field,
        slot: &mut Slot,
        columns: &mut Vec<String>,
        values: &mut Vec<Value>,
    ) {
        if field.readonly {
            return;
        }

        if slot.value.is_null() {
            if let Some(default) = &field.default {
                slot.value = default.resolve();
            }
        }

        columns.push(field.storage_name().to_string());
        values.push(relations_sql::encode_field(field, slot.value.clone()));
        slot.changed = false;
    }

    /// Adds a field's filter to the WHERE clause.
    pub fn field_retrieve(
        &self,
        field: &Field,
        filter: &Filter,
        query: &mut QueryTemplate,
        params: &mut Vec<Value>,
    ) {
        query.add_where(
            self.serializer()
                .filter(field.storage_name(), filter, params),
        );
    }

    /// Adds a field to an UPDATE's SET list.
    ///
    /// With `changed_only`, unchanged fields are left out unless they are
    /// replace fields, which re-apply their default when unchanged.
    /// Read-only fields are always left out.
    pub fn field_update(
        &self,
        field: &Field,
        slot: &mut Slot,
        clauses: &mut Vec<String>,
        params: &mut Vec<Value>,
        changed_only: bool,
    ) {
        if field.readonly {
            return;
        }

        if field.replace && !slot.changed {
            slot.value = field
                .default
                .as_ref()
                .map(FieldDefault::resolve)
                .unwrap_or_default();
        } else if changed_only && !slot.changed {
            return;
        }

        let value = relations_sql::encode_field(field, slot.value.clone());
        clauses.push(
            self.serializer()
                .assignment(field.storage_name(), &value, params),
        );
        slot.changed = false;
    }

    /// Adds ORDER BY terms: the requested sort, or the model's titles
    /// ascending.
    pub fn model_sort(&self, model: &Model, sort: &[Sort], query: &mut QueryTemplate) -> Result<()> {
        let serializer = self.serializer();

        if sort.is_empty() {
            for title in &model.titles {
                let field = model.field_named(title)?;
                query.add_order_by(serializer.order_by(field.storage_name(), Default::default()));
            }
        } else {
            for sort in sort {
                let field = model.field_named(&sort.field)?;
                query.add_order_by(serializer.order_by(field.storage_name(), sort.direction));
            }
        }

        Ok(())
    }

    /// Sets the LIMIT clause from the requested limit and offset.
    pub fn model_limit(&self, request: &Query, query: &mut QueryTemplate, params: &mut Vec<Value>) {
        query.set_limits(
            self.serializer()
                .limits(request.limit, request.offset, params),
        );
    }

    /// Prepares values keyed by storage name for binding.
    pub fn encode(&self, model: &Model, values: IndexMap<String, Value>) -> IndexMap<String, Value> {
        relations_sql::encode(model, values)
    }
}
