//! Execution adapter and per-widget session
//!
//! The client side of the builder: compiled text goes out as
//! `{"query": "..."}` over HTTPS POST and comes back as a parsed response or
//! a single structured [`ExecutionError`](crate::core::ExecutionError).

pub mod executor;
pub mod response;
pub mod session;
pub mod transport;

pub use executor::QueryExecutor;
pub use response::{
    GraphQLErrorEntry, GraphQLRequest, GraphQLResponse, TransportResponse, classify,
};
pub use session::{Outcome, QuerySession};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::QueryTransport;
