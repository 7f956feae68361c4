/// A SELECT statement assembled from text fragments.
///
/// Models cache the base template (`SELECT * FROM <table>`); each retrieve
/// clones it and appends WHERE, ORDER BY and LIMIT fragments before calling
/// [`get`](QueryTemplate::get).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTemplate {
    pub selects: String,

    /// Qualified, quoted table name
    pub from: String,

    /// WHERE fragments, AND-joined
    pub wheres: Vec<String>,

    /// ORDER BY terms, comma-joined
    pub order_bys: Vec<String>,

    /// Text following `LIMIT`, empty for no limit
    pub limits: String,
}

impl QueryTemplate {
    pub fn new(selects: impl Into<String>, from: impl Into<String>) -> QueryTemplate {
        QueryTemplate {
            selects: selects.into(),
            from: from.into(),
            ..QueryTemplate::default()
        }
    }

    pub fn add_where(&mut self, fragment: impl Into<String>) {
        self.wheres.push(fragment.into());
    }

    pub fn add_order_by(&mut self, fragment: impl Into<String>) {
        self.order_bys.push(fragment.into());
    }

    pub fn set_limits(&mut self, limits: impl Into<String>) {
        self.limits = limits.into();
    }

    /// The WHERE predicate text, without the keyword.
    pub fn where_clause(&self) -> String {
        self.wheres.join(" AND ")
    }

    /// The ORDER BY text, without the keyword.
    pub fn order_by_clause(&self) -> String {
        self.order_bys.join(",")
    }

    /// Final statement text.
    pub fn get(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.selects, self.from);

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clause());
        }

        if !self.order_bys.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by_clause());
        }

        if !self.limits.is_empty() {
            sql.push_str(" LIMIT ");
            sql.push_str(&self.limits);
        }

        sql
    }
}
