//! Root parameter definitions, literal rendering and format checks

use chrono::DateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Value kind of a root parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Number,
    String,
    /// 20-byte hex account address (`0x` + 40 hex digits)
    Address,
    Boolean,
    /// RFC 3339 date-time
    Timestamp,
    /// Bare enum value such as `AVG`
    Enum,
}

impl ParameterKind {
    /// Whether values of this kind are emitted as quoted strings
    pub fn is_quoted(&self) -> bool {
        matches!(
            self,
            ParameterKind::String | ParameterKind::Address | ParameterKind::Timestamp
        )
    }
}

/// Definition of one parameter accepted by a schema root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,

    pub kind: ParameterKind,

    #[serde(default)]
    pub required: bool,

    /// Value applied when nothing is provided (only honoured where the
    /// root's argument style supports defaults)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Hint shown in an empty input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
            placeholder: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Token emitted in query text when no value is provided
    pub fn placeholder_token(&self) -> String {
        format!("<{}>", self.name)
    }

    /// Hint text for an empty input box
    pub fn placeholder_text(&self) -> String {
        match (&self.placeholder, &self.default) {
            (Some(placeholder), _) => placeholder.clone(),
            (None, Some(default)) => format!("default: {}", default),
            (None, None) => self.name.clone(),
        }
    }

    /// Render a raw user value as a GraphQL literal
    ///
    /// The raw value is trimmed. Quoted kinds are wrapped in double quotes
    /// unless the user already typed them.
    pub fn render_literal(&self, raw: &str) -> String {
        let value = raw.trim();
        if self.kind.is_quoted() && !is_quoted(value) {
            format!("\"{}\"", escape(value))
        } else {
            value.to_string()
        }
    }

    /// Check a raw value against this parameter's kind
    pub fn validate(&self, raw: &str) -> Result<(), String> {
        let value = unquote(raw.trim());
        let valid = match self.kind {
            ParameterKind::Number => number_regex().is_match(value),
            ParameterKind::Address => address_regex().is_match(value),
            ParameterKind::Boolean => value == "true" || value == "false",
            ParameterKind::Timestamp => DateTime::parse_from_rfc3339(value).is_ok(),
            ParameterKind::Enum => enum_regex().is_match(value),
            ParameterKind::String => true,
        };

        if valid {
            Ok(())
        } else {
            Err(format!(
                "'{}' is not a valid {:?} value for '{}'",
                value, self.kind, self.name
            ))
        }
    }
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

fn unquote(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap())
}

fn address_regex() -> &'static Regex {
    static ADDRESS_REGEX: OnceLock<Regex> = OnceLock::new();
    ADDRESS_REGEX.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap())
}

fn enum_regex() -> &'static Regex {
    static ENUM_REGEX: OnceLock<Regex> = OnceLock::new();
    ENUM_REGEX.get_or_init(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap())
}
