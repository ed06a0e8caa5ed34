pub mod engine;
pub mod error;
pub mod schema;

pub use error::{Error, Result};
pub use schema::{Field, FieldKind, FieldType, Schema, SchemaBuilder, SchemaLoader, DEFAULT_ID_FIELD};
