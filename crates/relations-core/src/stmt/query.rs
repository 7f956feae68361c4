use super::{Filter, Op, Sort, Value};

/// The retrieval state for one call: filters, traversal term, sort and
/// paging.
///
/// A `Query` is built per call and passed by reference into the executor.
/// Nothing in it is consumed or cleared by running it, so the same value
/// can be run again to fetch the same page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    /// Per-field filters, AND-joined
    pub filters: Vec<Filter>,

    /// Relationship traversal term matched against title fields and parent
    /// models
    pub like: Option<String>,

    /// Explicit sort order. Empty means the model's default order.
    pub sort: Vec<Sort>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,

    /// Bound on parent id sub-lookups made while resolving `like`
    pub chunk: Option<u64>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    pub fn filter(mut self, field: impl Into<String>, op: Op, value: impl Into<Value>) -> Query {
        self.filters.push(Filter::new(field, op, value));
        self
    }

    /// Adds a filter from a `field` or `field__op` key.
    pub fn by(mut self, key: &str, value: impl Into<Value>) -> Query {
        self.filters.push(Filter::parse(key, value));
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Query {
        self.filter(field, Op::Eq, value)
    }

    pub fn like(mut self, term: impl Into<String>) -> Query {
        self.like = Some(term.into());
        self
    }

    /// Appends sort terms, each `name` or `-name`.
    pub fn sort(mut self, specs: &[&str]) -> Query {
        self.sort.extend(specs.iter().map(|spec| Sort::parse(spec)));
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Query {
        self.offset = Some(offset);
        self
    }

    pub fn chunk(mut self, chunk: u64) -> Query {
        self.chunk = Some(chunk);
        self
    }
}
