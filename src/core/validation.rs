//! Executability checks run before a compiled query is sent
//!
//! The compiler never refuses to produce text. Whether that text may go over
//! the wire is decided here.

use super::schema::SchemaRoot;
use super::selection::ParameterValues;
use serde::Serialize;

/// Reason a compiled query cannot be executed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "issue", content = "detail", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("No field selected")]
    NothingSelected,

    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Unresolved placeholder {0}")]
    UnresolvedPlaceholder(String),

    #[error("A bearer token is required for this API")]
    MissingCredential,

    #[error("Invalid query syntax: {0}")]
    Syntax(String),
}

/// Check whether `compiled` can be sent for `root` with `params`
///
/// Returns every issue found; an empty list means executable.
pub fn validate_executable(
    root: &SchemaRoot,
    params: &ParameterValues,
    compiled: &str,
) -> Vec<ValidationIssue> {
    if compiled.trim().is_empty() {
        return vec![ValidationIssue::NothingSelected];
    }

    let mut issues: Vec<ValidationIssue> = params
        .missing_required(root)
        .into_iter()
        .map(|name| ValidationIssue::MissingParameter(name.to_string()))
        .collect();

    for param in &root.parameters {
        if let Some(raw) = params.provided(&param.name) {
            if let Err(message) = param.validate(raw) {
                issues.push(ValidationIssue::InvalidParameter(message));
            }
        }
    }

    let placeholders = unresolved_placeholders(root, params, compiled);
    let has_placeholders = !placeholders.is_empty();
    issues.extend(
        placeholders
            .into_iter()
            .map(ValidationIssue::UnresolvedPlaceholder),
    );

    // Placeholders are not valid syntax, so only parse once they are gone
    if !has_placeholders {
        if let Err(err) = graphql_parser::parse_query::<String>(compiled) {
            issues.push(ValidationIssue::Syntax(err.to_string()));
        }
    }

    issues
}

/// Placeholder tokens still standing in for parameters of `root`
///
/// Derived from the parameter values rather than by scanning the text, so a
/// provided value that happens to look like `<name>` is never reported.
pub fn unresolved_placeholders(
    root: &SchemaRoot,
    params: &ParameterValues,
    compiled: &str,
) -> Vec<String> {
    root.unresolved_parameters(params)
        .into_iter()
        .map(|p| p.placeholder_token())
        .filter(|token| compiled.contains(token.as_str()))
        .collect()
}
