//! Schema roots and their parameter-to-argument strategies

use super::field::{SchemaField, find_in};
use super::parameter::ParameterDefinition;
use super::selection::ParameterValues;
use serde::{Deserialize, Serialize};

/// How a root turns its parameter values into invocation arguments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum ArgumentStyle {
    /// `root(a: 1, b: "x")`
    #[default]
    Keyword,

    /// `root(by: {a: 1})`
    Wrapped { argument: String },

    /// `root(first: 10, filterBy: {owner: "0x.."})`
    ///
    /// The object argument is dropped when none of its members is provided.
    /// `limit` names a default-bearing parameter emitted as its own keyword
    /// argument.
    Filter {
        argument: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<String>,
    },
}

/// A top-level queryable operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRoot {
    /// Registry key
    pub id: String,

    /// Root field name emitted in query text
    pub invocation_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub arguments: ArgumentStyle,

    /// Argument clause appended to containers marked `paginated`
    #[serde(default = "default_pagination_clause")]
    pub pagination_clause: String,

    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,

    pub fields: Vec<SchemaField>,
}

fn default_pagination_clause() -> String {
    "first: 10".to_string()
}

impl SchemaRoot {
    pub fn new(id: impl Into<String>, invocation_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            invocation_name: invocation_name.into(),
            description: None,
            arguments: ArgumentStyle::Keyword,
            pagination_clause: default_pagination_clause(),
            parameters: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_arguments(mut self, arguments: ArgumentStyle) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_pagination_clause(mut self, clause: impl Into<String>) -> Self {
        self.pagination_clause = clause.into();
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_fields(mut self, fields: Vec<SchemaField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Resolve a root-relative dotted path
    pub fn field(&self, path: &str) -> Option<&SchemaField> {
        find_in(&self.fields, path)
    }

    /// Every selectable leaf path, in declaration order
    pub fn leaf_paths(&self) -> Vec<String> {
        self.fields.iter().flat_map(|f| f.leaf_paths("")).collect()
    }

    /// Build the `(...)` clause for the invocation, or `""` when empty
    ///
    /// Never fails: missing values degrade to `<name>` placeholders.
    pub fn argument_clause(&self, values: &ParameterValues) -> String {
        let parts = match &self.arguments {
            ArgumentStyle::Keyword => self
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, value_or_fallback(p, values)))
                .collect::<Vec<_>>(),
            ArgumentStyle::Wrapped { argument } => {
                if self.parameters.is_empty() {
                    Vec::new()
                } else {
                    let members = self
                        .parameters
                        .iter()
                        .map(|p| format!("{}: {}", p.name, value_or_fallback(p, values)))
                        .collect::<Vec<_>>();
                    vec![format!("{}: {{{}}}", argument, members.join(", "))]
                }
            }
            ArgumentStyle::Filter { argument, limit } => {
                self.filter_parts(argument, limit.as_deref(), values)
            }
        };

        if parts.is_empty() {
            String::new()
        } else {
            format!("({})", parts.join(", "))
        }
    }

    /// Parameters whose value `argument_clause` replaces with a placeholder
    ///
    /// Filter-style roots never emit placeholders: unprovided members are
    /// omitted and the limit falls back to its default.
    pub fn unresolved_parameters(&self, values: &ParameterValues) -> Vec<&ParameterDefinition> {
        match &self.arguments {
            ArgumentStyle::Keyword | ArgumentStyle::Wrapped { .. } => self
                .parameters
                .iter()
                .filter(|p| !values.is_provided(&p.name) && p.default.is_none())
                .collect(),
            ArgumentStyle::Filter { .. } => Vec::new(),
        }
    }

    fn filter_parts(
        &self,
        argument: &str,
        limit: Option<&str>,
        values: &ParameterValues,
    ) -> Vec<String> {
        let mut parts = Vec::new();

        if let Some(param) = limit.and_then(|name| self.parameter(name)) {
            if let Some(raw) = values.provided(&param.name) {
                parts.push(format!("{}: {}", param.name, param.render_literal(raw)));
            } else if let Some(default) = &param.default {
                parts.push(format!("{}: {}", param.name, param.render_literal(default)));
            }
        }

        let members = self
            .parameters
            .iter()
            .filter(|p| Some(p.name.as_str()) != limit)
            .filter_map(|p| {
                values
                    .provided(&p.name)
                    .map(|raw| format!("{}: {}", p.name, p.render_literal(raw)))
            })
            .collect::<Vec<_>>();

        if !members.is_empty() {
            parts.push(format!("{}: {{{}}}", argument, members.join(", ")));
        }

        parts
    }
}

fn value_or_fallback(param: &ParameterDefinition, values: &ParameterValues) -> String {
    match (values.provided(&param.name), &param.default) {
        (Some(raw), _) => param.render_literal(raw),
        (None, Some(default)) => param.render_literal(default),
        (None, None) => param.placeholder_token(),
    }
}
