use super::Source;
use crate::Result;

use relations_core::{
    driver::Row,
    schema::{Model, Relation},
    stmt::{Filter, Op, Query, QueryTemplate, Value},
    Error, Instance,
};
use std::sync::Arc;

/// Instances returned by a many-row retrieve.
#[derive(Debug, Clone, Default)]
pub struct Retrieved {
    pub instances: Vec<Instance>,

    /// Set when a bound cut the results short, so more rows may match than
    /// were returned. One row past each bound is fetched, so a limit equal
    /// to the number of matching rows does not overflow.
    pub overflow: bool,
}

impl Retrieved {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// One field's value from every instance, in result order.
    pub fn values(&self, field: &str) -> Result<Vec<Value>> {
        self.instances
            .iter()
            .map(|instance| instance.get(field).cloned())
            .collect()
    }
}

impl IntoIterator for Retrieved {
    type Item = Instance;
    type IntoIter = std::vec::IntoIter<Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.into_iter()
    }
}

/// How a filter names its field.
enum Target<'a> {
    /// A field of the model itself.
    Own(&'a str),

    /// A field of a related model, through `relation`.
    Related {
        relation: Relation,
        /// True when the related model is the child side.
        child: bool,
        field: &'a str,
    },
}

impl Source {
    /// Retrieves exactly one instance.
    ///
    /// Fails when no row or more than one row matches.
    #[tracing::instrument(level = "debug", skip(self, query))]
    pub fn retrieve_one(&mut self, model: &str, query: &Query) -> Result<Instance> {
        let model = self.model(model)?;
        let mut rows = self.fetch_at_most_one(&model, query)?;

        match rows.len() {
            0 => Err(Error::record_not_found(model.table_name())),
            1 => Ok(Instance::materialize(&model, &rows.remove(0))),
            _ => Err(Error::too_many_records(model.table_name())),
        }
    }

    /// Like [`Source::retrieve_one`], but no match is `None` rather than an
    /// error.
    #[tracing::instrument(level = "debug", skip(self, query))]
    pub fn retrieve_optional(&mut self, model: &str, query: &Query) -> Result<Option<Instance>> {
        let model = self.model(model)?;
        let mut rows = self.fetch_at_most_one(&model, query)?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(Some(Instance::materialize(&model, &rows.remove(0)))),
            _ => Err(Error::too_many_records(model.table_name())),
        }
    }

    /// Retrieves every matching instance.
    ///
    /// With a limit `n`, one row past it is fetched; its presence sets
    /// `overflow` and it is dropped from the result.
    #[tracing::instrument(level = "debug", skip(self, query))]
    pub fn retrieve_many(&mut self, model: &str, query: &Query) -> Result<Retrieved> {
        let model = self.model(model)?;
        self.retrieve_model(&model, query)
    }

    /// Loads the children of `instance` in `child`, replacing any attached
    /// ones.
    #[tracing::instrument(level = "debug", skip(self, instance), fields(model = %instance.model().name))]
    pub fn retrieve_children(&mut self, instance: &mut Instance, child: &str) -> Result<()> {
        let relation = self
            .catalog
            .relation(&instance.model().name, child)?
            .clone();
        let key = instance.get(relation.parent_field())?.clone();

        let children = if key.is_null() {
            vec![]
        } else {
            self.retrieve_many(child, &Query::new().eq(relation.child_field(), key))?
                .instances
        };

        instance.set_children(child, children);
        Ok(())
    }

    /// Counts matching rows. Sort and limit are ignored.
    #[tracing::instrument(level = "debug", skip(self, query))]
    pub fn count(&mut self, model: &str, query: &Query) -> Result<u64> {
        let model = self.model(model)?;

        let mut params = vec![];
        let (template, _) = self.compile(&model, query, &mut params)?;
        let sql = self.serializer().count(&template);

        let rows = self.query(&sql, &params)?;
        let count = rows
            .first()
            .and_then(|row| row.iter().next())
            .and_then(|(_, value)| value.as_i64())
            .unwrap_or_default();

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Adds the text search predicate for `like`.
    ///
    /// Each title field is matched case-insensitively. Each parent relation
    /// contributes a membership clause over the ids of parents that match
    /// `like` themselves; that lookup uses at most `chunk` ids,
    /// fetching one more, and reports overflow when the extra row exists. All clauses
    /// are OR-joined in one parenthesized predicate.
    pub fn model_like(
        &mut self,
        model: &Model,
        like: &str,
        chunk: Option<u64>,
        query: &mut QueryTemplate,
        params: &mut Vec<Value>,
    ) -> Result<bool> {
        if like.is_empty() {
            return Ok(false);
        }

        let mut clauses = vec![];
        let mut overflow = false;

        let parents: Vec<Relation> = self.catalog.parents(&model.name).cloned().collect();
        for relation in parents {
            let parent = self.model(&relation.parent)?;

            let mut lookup = Query::new().like(like);
            lookup.limit = chunk;

            let found = self.retrieve_model(&parent, &lookup)?;
            if found.overflow {
                tracing::debug!(model = %model.name, parent = %parent.name, "parent lookup overflowed");
                overflow = true;
            }

            let ids = found.values(relation.parent_field())?;
            if !ids.is_empty() {
                let column = model.field_named(relation.child_field())?.storage_name();
                clauses.push(self.serializer().membership(column, &ids, params));
            }
        }

        for title in &model.titles {
            let field = model.field_named(title)?;
            clauses.push(self.serializer().filter(
                field.storage_name(),
                &Filter::new(title, Op::Like, like),
                params,
            ));
        }

        if !clauses.is_empty() {
            query.add_where(format!("({})", clauses.join(" OR ")));
        }

        Ok(overflow)
    }

    pub(super) fn retrieve_model(&mut self, model: &Arc<Model>, query: &Query) -> Result<Retrieved> {
        let mut params = vec![];
        let (mut template, mut overflow) = self.compile(model, query, &mut params)?;

        let bounded = Query {
            limit: query.limit.map(|limit| limit.saturating_add(1)),
            ..query.clone()
        };
        self.model_limit(&bounded, &mut template, &mut params);

        let mut rows = self.query(&template.get(), &params)?;

        if let Some(limit) = query.limit.and_then(|limit| usize::try_from(limit).ok()) {
            if rows.len() > limit {
                tracing::debug!(model = %model.name, limit, "retrieve overflowed its limit");
                rows.truncate(limit);
                overflow = true;
            }
        }

        Ok(Retrieved {
            instances: rows
                .iter()
                .map(|row| Instance::materialize(model, row))
                .collect(),
            overflow,
        })
    }

    fn fetch_at_most_one(&mut self, model: &Arc<Model>, query: &Query) -> Result<Vec<Row>> {
        let mut params = vec![];
        let (mut template, _) = self.compile(model, query, &mut params)?;

        let bounded = Query {
            limit: Some(2),
            ..query.clone()
        };
        self.model_limit(&bounded, &mut template, &mut params);

        self.query(&template.get(), &params)
    }

    /// Builds the base query for `model` with its WHERE and ORDER BY
    /// clauses. Returns whether a relation lookup overflowed.
    pub(super) fn compile(
        &mut self,
        model: &Model,
        query: &Query,
        params: &mut Vec<Value>,
    ) -> Result<(QueryTemplate, bool)> {
        let mut template = model.query.clone();

        for filter in &query.filters {
            self.add_filter(model, filter, &mut template, params)?;
        }

        let overflow = match &query.like {
            Some(like) => self.model_like(model, like, query.chunk, &mut template, params)?,
            None => false,
        };

        self.model_sort(model, &query.sort, &mut template)?;

        Ok((template, overflow))
    }

    /// Adds a filter predicate, resolving filters on related models to a
    /// membership clause over matching keys.
    pub(super) fn add_filter(
        &mut self,
        model: &Model,
        filter: &Filter,
        template: &mut QueryTemplate,
        params: &mut Vec<Value>,
    ) -> Result<()> {
        match self.target(model, &filter.field)? {
            Target::Own(name) => {
                let field = model.field_named(name)?;
                self.field_retrieve(field, filter, template, params);
            }
            Target::Related {
                relation,
                child,
                field,
            } => {
                let (related, local, remote) = if child {
                    (&relation.child, relation.parent_field(), relation.child_field())
                } else {
                    (&relation.parent, relation.child_field(), relation.parent_field())
                };

                let related = self.model(related)?;
                let lookup = Query::new().filter(field, filter.op, filter.value.clone());
                let mut keys = self.retrieve_model(&related, &lookup)?.values(remote)?;
                keys.dedup();

                let column = model.field_named(local)?.storage_name();
                template.add_where(self.serializer().membership(column, &keys, params));
            }
        }

        Ok(())
    }

    fn target<'a>(&self, model: &Model, name: &'a str) -> Result<Target<'a>> {
        if model.find_field(name).is_some() {
            return Ok(Target::Own(name));
        }

        if let Some((prefix, field)) = name.split_once("__") {
            let names = |other: &str| -> bool {
                self.catalog
                    .model(other)
                    .map(|other| other.name == prefix || other.table_name() == prefix)
                    .unwrap_or(false)
            };

            if let Some(relation) = self.catalog.children(&model.name).find(|r| names(&r.child)) {
                return Ok(Target::Related {
                    relation: relation.clone(),
                    child: true,
                    field,
                });
            }

            if let Some(relation) = self.catalog.parents(&model.name).find(|r| names(&r.parent)) {
                return Ok(Target::Related {
                    relation: relation.clone(),
                    child: false,
                    field,
                });
            }
        }

        // Reports the unknown field.
        model.field_named(name)?;
        Ok(Target::Own(name))
    }

    pub(super) fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        tracing::debug!(source = %self.name, sql, params = params.len(), "query");
        self.connection.query(sql, params)
    }

    pub(super) fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        tracing::debug!(source = %self.name, sql, params = params.len(), "execute");
        self.connection.execute(sql, params)
    }
}
