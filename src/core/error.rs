//! Typed errors for the query builder
//!
//! # Error Categories
//!
//! - [`QueryBuilderError`]: schema lookups, configuration and the
//!   "not executable yet" gate in front of the network
//! - [`ExecutionError`]: everything that can go wrong once a query is sent,
//!   collapsed into one structured value (kind + message + optional status)
//!
//! Compilation itself never fails. Nothing selected yields an empty query and
//! a missing parameter yields a `<name>` placeholder; both are states for the
//! caller to display, not errors.
//!
//! # Example
//!
//! ```rust,ignore
//! match session.run().await {
//!     Ok(response) => println!("{}", response.data.unwrap_or_default()),
//!     Err(QueryBuilderError::Execution(e)) if e.is_aborted() => {}
//!     Err(QueryBuilderError::Execution(e)) => eprintln!("[{}] {}", e.error_code(), e),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use super::validation::ValidationIssue;
use serde::{Deserialize, Serialize};

/// Errors raised by registry lookups, state updates and configuration
#[derive(Debug, thiserror::Error)]
pub enum QueryBuilderError {
    #[error("Unknown schema root: {0}")]
    UnknownRoot(String),

    #[error("Unknown parameter '{parameter}' for root '{root}'")]
    UnknownParameter { root: String, parameter: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Query is not executable: {}", join_issues(.0))]
    NotExecutable(Vec<ValidationIssue>),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Category of an execution failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Network failure, non-2xx status or unreadable body
    Transport,
    /// The endpoint answered but reported errors in its `errors` array
    Query,
    /// Superseded by a newer request from the same executor
    Aborted,
}

/// Structured error surfaced by the execution adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ExecutionError {
    /// Non-2xx HTTP status
    pub fn http(status: u16, status_text: &str) -> Self {
        let message = if status_text.is_empty() {
            format!("HTTP error {}", status)
        } else {
            format!("HTTP error {}: {}", status, status_text)
        };
        Self {
            kind: ErrorKind::Transport,
            message,
            status: Some(status),
        }
    }

    /// Network-level failure without a usable status
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    /// Errors reported by the endpoint in a 2xx response
    pub fn query(messages: &[String], status: u16) -> Self {
        Self {
            kind: ErrorKind::Query,
            message: messages.join("; "),
            status: Some(status),
        }
    }

    pub fn aborted() -> Self {
        Self {
            kind: ErrorKind::Aborted,
            message: "Request superseded by a newer one".to_string(),
            status: None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.kind == ErrorKind::Aborted
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::Transport => "TRANSPORT_ERROR",
            ErrorKind::Query => "QUERY_ERROR",
            ErrorKind::Aborted => "ABORTED",
        }
    }
}
