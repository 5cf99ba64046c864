//! # Vehicle Query Builder
//!
//! A schema-driven GraphQL query builder for vehicle identity and telemetry
//! APIs, with an execution adapter to send the result.
//!
//! ## Features
//!
//! - **Declarative Schemas**: roots, parameters and field trees as plain data,
//!   authored in code or loaded from YAML
//! - **Pure Compiler**: identical inputs always give byte-identical query text
//! - **Graceful Degradation**: missing parameters become `<name>` placeholders,
//!   never errors
//! - **Pagination Idioms**: `edges { node { } }` and `nodes { }` wrappers
//! - **Reducer State**: explicit selection/parameter state with pure updates
//! - **Last-Write-Wins Execution**: a new request aborts the pending one
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vqb::prelude::*;
//!
//! let session = QuerySession::http(ApiConfig::identity())?;
//! session.select_root("vehicle")?;
//! session.set_parameter("tokenId", "21957")?;
//! session.toggle("owner")?;
//! session.toggle("definition.make")?;
//!
//! println!("{}", session.compiled()?);
//! // query {
//! //   vehicle(tokenId: 21957) {
//! //     owner
//! //     definition {
//! //       make
//! //     }
//! //   }
//! // }
//!
//! let response = session.run().await?;
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod core;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Schema ===
    pub use crate::core::{
        ArgumentStyle, ParameterDefinition, ParameterKind, SchemaField, SchemaRegistry,
        SchemaRoot, Wrapping,
    };

    // === State & Compiler ===
    pub use crate::core::{
        BuilderAction, BuilderState, ParameterValues, QueryCompiler, SelectionState, compile,
        reduce, validate_executable,
    };

    // === Errors ===
    pub use crate::core::{ErrorKind, ExecutionError, QueryBuilderError, ValidationIssue};

    // === Catalog & Config ===
    pub use crate::catalog::{identity_registry, telemetry_registry};
    pub use crate::config::{ApiConfig, ExecutorConfig};

    // === Client ===
    #[cfg(feature = "http")]
    pub use crate::client::HttpTransport;
    pub use crate::client::{
        GraphQLRequest, GraphQLResponse, Outcome, QueryExecutor, QuerySession, QueryTransport,
        TransportResponse,
    };
}
