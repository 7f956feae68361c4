#[macro_use]
mod macros;

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::Error;

pub mod record;
pub use record::{Action, Instance, Record};

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses the adapter's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
