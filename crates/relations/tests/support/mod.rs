#![allow(dead_code)]

use relations::{Connection, Error, Field, Index, Model, Relation, Result, Row, Source, Value};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// A statement the mock connection received.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecOp {
    pub sql: String,
    pub params: Vec<Value>,
}

/// What the mock connection answers the next statement with.
#[derive(Debug)]
pub enum Reply {
    Rows(Vec<Row>),
    Count(u64),
    Fail(String),
}

/// Shared view of a [`MockConnection`]'s log and script.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<ExecOp>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
    closed: Arc<Mutex<bool>>,
    close_error: Arc<Mutex<Option<String>>>,
}

impl ExecLog {
    pub fn rows(&self, rows: Vec<Row>) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Rows(rows));
        self
    }

    pub fn count(&self, count: u64) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Count(count));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fail(message.to_string()));
        self
    }

    /// Makes closing the connection fail with `message`.
    pub fn fail_close(&self, message: &str) {
        *self.close_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn ops(&self) -> Vec<ExecOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn sql(&self) -> Vec<String> {
        self.ops().into_iter().map(|op| op.sql).collect()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    fn record(&self, sql: &str, params: &[Value]) -> Option<Reply> {
        self.ops.lock().unwrap().push(ExecOp {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        self.replies.lock().unwrap().pop_front()
    }
}

/// Connection double that logs every statement and replays scripted
/// replies in order. Unscripted queries return no rows and unscripted
/// executes affect one row.
#[derive(Debug, Default)]
pub struct MockConnection {
    log: ExecLog,
}

impl MockConnection {
    pub fn new() -> (MockConnection, ExecLog) {
        let connection = MockConnection::default();
        let log = connection.log.clone();
        (connection, log)
    }
}

impl Connection for MockConnection {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        match self.log.record(sql, params) {
            Some(Reply::Count(count)) => Ok(count),
            Some(Reply::Rows(rows)) => Ok(rows.len() as u64),
            Some(Reply::Fail(message)) => Err(Error::driver(std::io::Error::other(message))),
            None => Ok(1),
        }
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        match self.log.record(sql, params) {
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Count(count)) => Ok(vec![Row::new().with("count", count as i64)]),
            Some(Reply::Fail(message)) => Err(Error::driver(std::io::Error::other(message))),
            None => Ok(vec![]),
        }
    }

    fn close(self: Box<Self>) -> Result<()> {
        *self.log.closed.lock().unwrap() = true;
        match self.log.close_error.lock().unwrap().take() {
            Some(message) => Err(Error::driver(std::io::Error::other(message))),
            None => Ok(()),
        }
    }
}

/// A source over a mock connection, with the models used across tests.
///
/// `Simple` has many `Plain` (which has no id). `Unit` has many `Test`,
/// and each `Test` has one `Case`. `Meta` covers every field type.
pub fn source() -> (Source, ExecLog) {
    let (connection, log) = MockConnection::new();
    let mut source = Source::new("unit", "test_source", Box::new(connection));

    source.register(
        Model::new("Simple")
            .field(Field::int("id"))
            .field(Field::text("name")),
    );
    source.register(
        Model::new("Plain")
            .field(Field::int("simple_id"))
            .field(Field::text("name")),
    );
    source.register(
        Model::new("Meta")
            .field(Field::int("id"))
            .field(Field::text("name"))
            .field(Field::bool("flag"))
            .field(Field::float("spend"))
            .field(Field::list("stuff"))
            .field(Field::map("things")),
    );
    source.register(
        Model::new("Unit")
            .field(Field::int("id"))
            .field(Field::text("name")),
    );
    source.register(
        Model::new("Test")
            .field(Field::int("id"))
            .field(Field::int("unit_id"))
            .field(Field::text("name"))
            .unique(Index::new(&["unit_id", "name"]))
            .titles(&["name"]),
    );
    source.register(
        Model::new("Case")
            .field(Field::int("id"))
            .field(Field::int("test_id"))
            .field(Field::text("name")),
    );

    source
        .relate(Relation::one_to_many("Simple", "Plain"))
        .unwrap();
    source.relate(Relation::one_to_many("Unit", "Test")).unwrap();
    source.relate(Relation::one_to_one("Test", "Case")).unwrap();

    (source, log)
}

pub fn row(columns: &[(&str, Value)]) -> Row {
    columns
        .iter()
        .map(|(name, value)| (*name, value.clone()))
        .collect()
}
