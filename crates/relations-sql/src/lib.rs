pub mod encode;
pub use encode::{encode, encode_field};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};
