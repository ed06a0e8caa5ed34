pub mod builder;
pub mod loader;
pub mod types;

pub use builder::{FieldDecl, SchemaBuilder, TextFieldDecl};
pub use loader::{FieldDef, SchemaFile, SchemaLoader};
pub use types::{Field, FieldKind, FieldType, Schema, DEFAULT_ID_FIELD};
