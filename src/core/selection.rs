//! Selection and parameter state, with a reducer for widget actions
//!
//! State is an explicit value. Every change goes through [`reduce`], which
//! returns the next state and leaves the previous one untouched, so the
//! compiler can be driven from any snapshot.

use super::error::QueryBuilderError;
use super::registry::SchemaRegistry;
use super::schema::SchemaRoot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dotted field path → included flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    paths: IndexMap<String, bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one path. Parents and children are left alone.
    pub fn toggle(&mut self, path: &str) -> bool {
        let flag = self.paths.entry(path.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn set(&mut self, path: impl Into<String>, selected: bool) {
        self.paths.insert(path.into(), selected);
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.paths.get(path).copied().unwrap_or(false)
    }

    pub fn any_selected(&self) -> bool {
        self.paths.values().any(|selected| *selected)
    }

    /// Selected paths in the order they were first touched
    pub fn selected_paths(&self) -> Vec<&str> {
        self.paths
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(path, _)| path.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

impl<P: Into<String>> FromIterator<(P, bool)> for SelectionState {
    fn from_iter<I: IntoIterator<Item = (P, bool)>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(|(p, s)| (p.into(), s)).collect(),
        }
    }
}

/// Parameter name → raw input string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValues {
    values: IndexMap<String, String>,
}

impl ParameterValues {
    /// Every parameter of `root` set to the empty string
    pub fn for_root(root: &SchemaRoot) -> Self {
        Self {
            values: root
                .parameters
                .iter()
                .map(|p| (p.name.clone(), String::new()))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value, including empty strings
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Raw value if it is non-blank
    pub fn provided(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    pub fn is_provided(&self, name: &str) -> bool {
        self.provided(name).is_some()
    }

    /// Names of required parameters of `root` that have no value
    pub fn missing_required<'a>(&self, root: &'a SchemaRoot) -> Vec<&'a str> {
        root.parameters
            .iter()
            .filter(|p| p.required && !self.is_provided(&p.name))
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// State owned by one query-builder widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderState {
    pub root_id: String,
    pub selection: SelectionState,
    pub parameters: ParameterValues,
}

impl BuilderState {
    /// Fresh state for `root`
    pub fn for_root(root: &SchemaRoot) -> Self {
        Self {
            root_id: root.id.clone(),
            selection: SelectionState::new(),
            parameters: ParameterValues::for_root(root),
        }
    }

    /// Fresh state for the first root of `registry`
    pub fn initial(registry: &SchemaRegistry) -> Option<Self> {
        registry.first().map(Self::for_root)
    }
}

/// A user action on a query-builder widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderAction {
    /// Switch the active root; resets selection and parameters
    SelectRoot(String),
    /// Flip one field path
    Toggle(String),
    SetParameter { name: String, value: String },
    /// Clear selection and parameters, keeping the active root
    Reset,
}

/// Compute the state that follows `action`
pub fn reduce(
    state: &BuilderState,
    action: &BuilderAction,
    registry: &SchemaRegistry,
) -> Result<BuilderState, QueryBuilderError> {
    match action {
        BuilderAction::SelectRoot(root_id) => {
            let root = registry.require(root_id)?;
            tracing::debug!(root = %root_id, "query builder root selected");
            Ok(BuilderState::for_root(root))
        }
        BuilderAction::Toggle(path) => {
            let root = registry.require(&state.root_id)?;
            if root.field(path).is_none() {
                tracing::debug!(root = %state.root_id, path = %path, "toggled path not in schema");
            }
            let mut next = state.clone();
            next.selection.toggle(path);
            Ok(next)
        }
        BuilderAction::SetParameter { name, value } => {
            let root = registry.require(&state.root_id)?;
            if root.parameter(name).is_none() {
                return Err(QueryBuilderError::UnknownParameter {
                    root: root.id.clone(),
                    parameter: name.clone(),
                });
            }
            let mut next = state.clone();
            next.parameters.set(name.clone(), value.clone());
            Ok(next)
        }
        BuilderAction::Reset => {
            let root = registry.require(&state.root_id)?;
            Ok(BuilderState::for_root(root))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::SchemaField;
    use crate::core::parameter::{ParameterDefinition, ParameterKind};

    fn registry() -> SchemaRegistry {
        SchemaRegistry::from_roots(vec![
            SchemaRoot::new("vehicle", "vehicle")
                .with_parameter(
                    ParameterDefinition::new("tokenId", ParameterKind::Number).required(),
                )
                .with_fields(vec![
                    SchemaField::leaf("owner"),
                    SchemaField::object("definition", vec![SchemaField::leaf("make")]),
                ]),
            SchemaRoot::new("manufacturer", "manufacturer")
                .with_parameter(ParameterDefinition::new("name", ParameterKind::String))
                .with_fields(vec![SchemaField::leaf("tokenId")]),
        ])
    }

    // --- SelectionState ---

    #[test]
    fn test_toggle_flips_one_path() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle("definition.make"));
        assert!(selection.is_selected("definition.make"));
        assert!(!selection.is_selected("definition"));

        assert!(!selection.toggle("definition.make"));
        assert!(!selection.any_selected());
    }

    #[test]
    fn test_selected_paths() {
        let selection: SelectionState =
            [("owner", true), ("definition", false), ("definition.make", true)]
                .into_iter()
                .collect();
        assert_eq!(selection.selected_paths(), vec!["owner", "definition.make"]);
    }

    // --- ParameterValues ---

    #[test]
    fn test_for_root_initialises_empty_values() {
        let registry = registry();
        let root = registry.get("vehicle").unwrap();
        let values = ParameterValues::for_root(root);
        assert_eq!(values.get("tokenId"), Some(""));
        assert!(!values.is_provided("tokenId"));
        assert_eq!(values.missing_required(root), vec!["tokenId"]);
    }

    #[test]
    fn test_blank_value_is_not_provided() {
        let mut values = ParameterValues::default();
        values.set("tokenId", "   ");
        assert!(!values.is_provided("tokenId"));
        values.set("tokenId", "5");
        assert_eq!(values.provided("tokenId"), Some("5"));
    }

    // --- Reducer ---

    #[test]
    fn test_reduce_toggle_is_pure() {
        let registry = registry();
        let state = BuilderState::initial(&registry).unwrap();
        let next = reduce(
            &state,
            &BuilderAction::Toggle("owner".to_string()),
            &registry,
        )
        .unwrap();

        assert!(!state.selection.is_selected("owner"));
        assert!(next.selection.is_selected("owner"));
    }

    #[test]
    fn test_reduce_select_root_resets_state() {
        let registry = registry();
        let mut state = BuilderState::initial(&registry).unwrap();
        state.selection.set("owner", true);
        state.parameters.set("tokenId", "1");

        let next = reduce(
            &state,
            &BuilderAction::SelectRoot("manufacturer".to_string()),
            &registry,
        )
        .unwrap();

        assert_eq!(next.root_id, "manufacturer");
        assert!(!next.selection.any_selected());
        assert_eq!(next.parameters.get("name"), Some(""));
        assert_eq!(next.parameters.get("tokenId"), None);
    }

    #[test]
    fn test_reduce_reselecting_same_root_resets() {
        let registry = registry();
        let mut state = BuilderState::initial(&registry).unwrap();
        state.selection.set("owner", true);

        let next = reduce(
            &state,
            &BuilderAction::SelectRoot("vehicle".to_string()),
            &registry,
        )
        .unwrap();
        assert!(!next.selection.any_selected());
    }

    #[test]
    fn test_reduce_unknown_root() {
        let registry = registry();
        let state = BuilderState::initial(&registry).unwrap();
        let err = reduce(
            &state,
            &BuilderAction::SelectRoot("nope".to_string()),
            &registry,
        )
        .unwrap_err();
        assert!(matches!(err, QueryBuilderError::UnknownRoot(id) if id == "nope"));
    }

    #[test]
    fn test_reduce_set_parameter() {
        let registry = registry();
        let state = BuilderState::initial(&registry).unwrap();
        let next = reduce(
            &state,
            &BuilderAction::SetParameter {
                name: "tokenId".to_string(),
                value: "42".to_string(),
            },
            &registry,
        )
        .unwrap();
        assert_eq!(next.parameters.provided("tokenId"), Some("42"));
    }

    #[test]
    fn test_reduce_unknown_parameter() {
        let registry = registry();
        let state = BuilderState::initial(&registry).unwrap();
        let result = reduce(
            &state,
            &BuilderAction::SetParameter {
                name: "color".to_string(),
                value: "red".to_string(),
            },
            &registry,
        );
        assert!(matches!(
            result,
            Err(QueryBuilderError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn test_reduce_reset_keeps_root() {
        let registry = registry();
        let mut state = BuilderState::for_root(registry.get("manufacturer").unwrap());
        state.selection.set("tokenId", true);
        state.parameters.set("name", "Ford");

        let next = reduce(&state, &BuilderAction::Reset, &registry).unwrap();
        assert_eq!(next.root_id, "manufacturer");
        assert!(!next.selection.any_selected());
        assert_eq!(next.parameters.get("name"), Some(""));
    }

    #[test]
    fn test_reduce_toggle_unknown_path_is_kept() {
        let registry = registry();
        let state = BuilderState::initial(&registry).unwrap();
        let next = reduce(
            &state,
            &BuilderAction::Toggle("ghost.field".to_string()),
            &registry,
        )
        .unwrap();
        assert!(next.selection.is_selected("ghost.field"));
    }
}
