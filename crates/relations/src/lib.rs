mod config;
pub use config::Config;

mod registry;
pub use registry::Registry;

pub mod source;
pub use source::{Retrieved, Source};

pub use relations_core::{
    bail, driver,
    driver::{Connection, Row},
    err,
    record::{Action, Instance, Record, Slot},
    schema::{self, Definition, Field, FieldTy, Index, Model, Relation},
    stmt::{self, Direction, Filter, Op, Query, QueryTemplate, Sort, Value},
    Error, Result, Schema,
};
