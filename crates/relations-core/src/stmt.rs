mod filter;
pub use filter::{Filter, Op};

mod query;
pub use query::Query;

mod sort;
pub use sort::{Direction, Sort};

mod value;
pub use value::Value;

mod query_template;
pub use query_template::QueryTemplate;
