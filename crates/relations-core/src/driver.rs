mod row;
pub use row::Row;

use crate::{stmt::Value, Result};

use std::fmt::Debug;

/// A live connection to a relational store.
///
/// Statements are parameterized with PostgreSQL positional placeholders
/// (`$1`, `$2`, ...) and run synchronously: each call completes before the
/// next begins. Failures surface as driver errors and are never retried.
pub trait Connection: Debug + Send {
    /// Runs a statement that returns no rows, reporting the affected row
    /// count.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Runs a statement and collects its rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Closes the connection.
    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
