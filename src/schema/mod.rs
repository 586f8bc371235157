pub mod source;
pub mod validator;

pub use source::{DirSchemaSource, SchemaSource};
pub use validator::{validate_against_schema, ValidationError};
