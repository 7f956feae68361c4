#[macro_use]
mod fmt;
use fmt::ToSql;

mod column_def;

mod create_index;

mod create_table;

mod delim;
use delim::{Comma, Delimited};

mod filter;

mod ident;
use ident::{Ident, TableName};

mod params;
pub use params::{Params, Placeholder};
use params::Param;

mod query;

mod statement;

mod ty;
use ty::ColumnType;
pub use ty::DEFAULT_TEXT_LENGTH;

mod value;
use value::Literal;

use relations_core::{schema::Model, stmt::Value};

/// Serializes statements to PostgreSQL text.
///
/// Values are never inlined into DML: each one is pushed onto a [`Params`]
/// collector and replaced by its `$n` placeholder, numbered in the order the
/// text is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer<'a> {
    /// Schema that qualifies tables whose model declares none.
    schema: Option<&'a str>,
}

struct Formatter<'a, P> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut P,
}

impl<'a> Serializer<'a> {
    pub fn postgresql(schema: Option<&'a str>) -> Serializer<'a> {
        Serializer { schema }
    }

    /// The quoted, possibly schema-qualified, table of a model.
    ///
    /// A schema on the model wins over the serializer's.
    pub fn table(&self, model: &Model) -> String {
        self.text(|f| fmt!(f, self.table_name(model)))
    }

    /// Serializes text that binds no parameters.
    fn text(&self, emit: impl FnOnce(&mut Formatter<'_, Vec<Value>>)) -> String {
        let mut params = vec![];
        self.fragment(&mut params, emit)
    }

    fn fragment<P: Params>(
        &self,
        params: &mut P,
        emit: impl FnOnce(&mut Formatter<'_, P>),
    ) -> String {
        let mut dst = String::new();
        let mut f = Formatter {
            dst: &mut dst,
            params,
        };
        emit(&mut f);
        dst
    }
}
