//! Compiler properties checked against every built-in schema root
//!
//! These tests verify that, for both catalogs:
//! - compilation is deterministic
//! - an empty selection compiles to nothing
//! - containers without a selected leaf never appear
//! - sibling order follows declaration order
//! - missing required parameters become placeholders
//! - pagination wrappers surround their children
//! - fully resolved queries are valid GraphQL

use vqb::catalog::{identity, telemetry};
use vqb::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

fn all_roots() -> Vec<SchemaRoot> {
    let mut roots = identity::roots();
    roots.extend(telemetry::roots());
    roots
}

fn select(paths: &[String]) -> SelectionState {
    paths.iter().map(|p| (p.clone(), true)).collect()
}

/// Every container in the tree with its root-relative path
fn containers<'a>(
    fields: &'a [SchemaField],
    prefix: &str,
    out: &mut Vec<(String, &'a SchemaField)>,
) {
    for field in fields {
        if field.is_container() {
            let path = field.path_under(prefix);
            containers(field.children(), &path, out);
            out.push((path, field));
        }
    }
}

fn sample_value(kind: ParameterKind) -> &'static str {
    match kind {
        ParameterKind::Number => "21957",
        ParameterKind::String => "sample",
        ParameterKind::Address => "0x00000000000000000000000000000000000000aa",
        ParameterKind::Boolean => "true",
        ParameterKind::Timestamp => "2024-05-01T00:00:00Z",
        ParameterKind::Enum => "AVG",
    }
}

fn filled_parameters(root: &SchemaRoot) -> ParameterValues {
    let mut values = ParameterValues::for_root(root);
    for param in &root.parameters {
        values.set(param.name.clone(), sample_value(param.kind));
    }
    values
}

// =============================================================================
// Laws
// =============================================================================

#[test]
fn test_determinism() {
    for root in all_roots() {
        let selection = select(&root.leaf_paths());
        let params = ParameterValues::for_root(&root);

        let first = compile(&root, &selection, &params);
        let second = compile(&root, &selection, &params);
        assert!(!first.is_empty(), "root {} compiled to nothing", root.id);
        assert_eq!(first, second, "root {} is not deterministic", root.id);
    }
}

#[test]
fn test_empty_selection_law() {
    for root in all_roots() {
        let params = filled_parameters(&root);
        assert_eq!(compile(&root, &SelectionState::new(), &params), "");

        let all_false: SelectionState = root.leaf_paths().into_iter().map(|p| (p, false)).collect();
        assert_eq!(compile(&root, &all_false, &params), "", "root {}", root.id);
    }
}

#[test]
fn test_container_suppression_law() {
    for root in all_roots() {
        let mut found = Vec::new();
        containers(&root.fields, "", &mut found);

        for (path, _) in found {
            let selection: SelectionState = [(path.clone(), true)].into_iter().collect();
            let query = compile(&root, &selection, &ParameterValues::for_root(&root));
            assert_eq!(query, "", "container {}.{} leaked into output", root.id, path);
        }
    }
}

#[test]
fn test_container_flag_does_not_pull_in_container() {
    let root = identity::vehicle();
    let selection: SelectionState = [("owner", true), ("definition", true), ("earnings", true)]
        .into_iter()
        .collect();
    let query = compile(&root, &selection, &ParameterValues::for_root(&root));

    assert!(query.contains("    owner\n"));
    assert!(!query.contains("definition"));
    assert!(!query.contains("earnings"));
}

#[test]
fn test_ordering_law() {
    for root in all_roots() {
        let top_leaves: Vec<&SchemaField> =
            root.fields.iter().filter(|f| !f.is_container()).collect();
        if top_leaves.is_empty() {
            continue;
        }

        // Select in reverse to make sure selection order is irrelevant
        let paths: Vec<String> = top_leaves.iter().rev().map(|f| f.id().to_string()).collect();
        let query = compile(&root, &select(&paths), &ParameterValues::for_root(&root));

        let emitted: Vec<&str> = query
            .lines()
            .filter(|line| line.starts_with("    ") && !line.starts_with("     "))
            .map(str::trim)
            .collect();
        let expected: Vec<&str> = top_leaves.iter().map(|f| f.display_name()).collect();
        assert_eq!(emitted, expected, "root {}", root.id);
    }
}

#[test]
fn test_placeholder_law() {
    for root in all_roots() {
        let selection = select(&root.leaf_paths()[..1]);
        let query = compile(&root, &selection, &ParameterValues::for_root(&root));

        for param in root.parameters.iter().filter(|p| p.required) {
            assert!(
                query.contains(&param.placeholder_token()),
                "root {} is missing placeholder for {}",
                root.id,
                param.name
            );
        }
    }
}

#[test]
fn test_wrapping_correctness() {
    for root in all_roots() {
        let mut found = Vec::new();
        containers(&root.fields, "", &mut found);

        for (path, field) in found {
            let SchemaField::Container {
                wrapping, children, ..
            } = field
            else {
                continue;
            };
            let Some(child) = children.iter().find(|c| !c.is_container()) else {
                continue;
            };

            let selection: SelectionState =
                [(format!("{}.{}", path, child.id()), true)].into_iter().collect();
            let query = compile(&root, &selection, &ParameterValues::for_root(&root));
            let lines: Vec<&str> = query.lines().map(str::trim).collect();
            let child_at = lines
                .iter()
                .position(|l| *l == child.display_name())
                .unwrap_or_else(|| panic!("{}.{} not emitted", root.id, path));

            match wrapping {
                Wrapping::EdgeNode => {
                    assert_eq!(lines[child_at - 2], "edges {", "{}.{}", root.id, path);
                    assert_eq!(lines[child_at - 1], "node {", "{}.{}", root.id, path);
                    assert_eq!(lines[child_at + 1], "}");
                    assert_eq!(lines[child_at + 2], "}");
                }
                Wrapping::NodeList => {
                    assert_eq!(lines[child_at - 1], "nodes {", "{}.{}", root.id, path);
                    assert_eq!(lines[child_at + 1], "}");
                }
                Wrapping::None => {
                    assert!(lines[child_at - 1].ends_with('{'));
                }
            }
        }
    }
}

#[test]
fn test_resolved_queries_are_valid_graphql() {
    for root in all_roots() {
        let selection = select(&root.leaf_paths());
        let params = filled_parameters(&root);
        let query = compile(&root, &selection, &params);

        let issues = validate_executable(&root, &params, &query);
        assert!(issues.is_empty(), "root {}: {:?}\n{}", root.id, issues, query);
    }
}

#[test]
fn test_indentation_is_consistent() {
    for root in all_roots() {
        let query = compile(
            &root,
            &select(&root.leaf_paths()),
            &ParameterValues::for_root(&root),
        );
        for line in query.lines() {
            let indent = line.len() - line.trim_start().len();
            assert_eq!(indent % 2, 0, "odd indentation in {}: {:?}", root.id, line);
        }
    }
}
