//! Core query-building engine: schema model, state, compiler and checks

pub mod compiler;
pub mod error;
pub mod field;
pub mod parameter;
pub mod registry;
pub mod schema;
pub mod selection;
pub mod validation;

pub use compiler::{QueryCompiler, compile};
pub use error::{ErrorKind, ExecutionError, QueryBuilderError};
pub use field::{SchemaField, Wrapping};
pub use parameter::{ParameterDefinition, ParameterKind};
pub use registry::SchemaRegistry;
pub use schema::{ArgumentStyle, SchemaRoot};
pub use selection::{BuilderAction, BuilderState, ParameterValues, SelectionState, reduce};
pub use validation::{ValidationIssue, validate_executable};
