//! GraphQL wire types and response classification

use crate::core::ExecutionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body POSTed to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    pub query: String,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// One entry of a response's `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLErrorEntry {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Parsed endpoint response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLErrorEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQLResponse {
    /// Messages of all reported errors
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.clone())
            .collect()
    }
}

/// Raw HTTP answer as seen by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turn a raw answer into a result or a structured error
///
/// - non-2xx: transport error carrying status code and text
/// - 2xx with a non-empty `errors` array: query error with joined messages
/// - 2xx with an unreadable body: transport error
pub fn classify(response: TransportResponse) -> Result<GraphQLResponse, ExecutionError> {
    if !response.is_success() {
        return Err(ExecutionError::http(response.status, &response.status_text));
    }

    let parsed: GraphQLResponse = serde_json::from_str(&response.body).map_err(|e| {
        let mut err = ExecutionError::transport(format!("Invalid JSON response: {}", e));
        err.status = Some(response.status);
        err
    })?;

    let messages = parsed.error_messages();
    if !messages.is_empty() {
        return Err(ExecutionError::query(&messages, response.status));
    }

    Ok(parsed)
}
