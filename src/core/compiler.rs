//! Query compiler: schema root + selection + parameters → query text
//!
//! The compiler is a pure function of its inputs. It walks the root's field
//! tree in declaration order and emits only branches that lead to at least
//! one selected leaf, so a container never shows up with empty braces.
//!
//! ```text
//! query {
//!   vehicle(tokenId: <tokenId>) {
//!     owner
//!     earnings {
//!       history(first: 10) {
//!         edges {
//!           node {
//!             week
//!           }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```

use super::field::{SchemaField, Wrapping};
use super::schema::SchemaRoot;
use super::selection::{ParameterValues, SelectionState};

/// Spaces per nesting level
pub const DEFAULT_INDENT: usize = 2;

/// Compile with the default indentation
pub fn compile(root: &SchemaRoot, selection: &SelectionState, params: &ParameterValues) -> String {
    QueryCompiler::default().compile(root, selection, params)
}

/// Query text generator
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler {
    indent: usize,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl QueryCompiler {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Build the query document
    ///
    /// Returns `""` when nothing selected maps to a leaf of `root`.
    pub fn compile(
        &self,
        root: &SchemaRoot,
        selection: &SelectionState,
        params: &ParameterValues,
    ) -> String {
        if !selection.any_selected() {
            return String::new();
        }

        let mut body = String::new();
        self.emit_fields(root, &root.fields, "", 2, selection, &mut body);
        if body.is_empty() {
            return String::new();
        }

        let mut query = String::from("query {\n");
        self.push_line(
            &mut query,
            1,
            &format!(
                "{}{} {{",
                root.invocation_name,
                root.argument_clause(params)
            ),
        );
        query.push_str(&body);
        self.push_line(&mut query, 1, "}");
        query.push('}');
        query
    }

    fn emit_fields(
        &self,
        root: &SchemaRoot,
        fields: &[SchemaField],
        prefix: &str,
        depth: usize,
        selection: &SelectionState,
        out: &mut String,
    ) {
        for field in fields {
            let path = field.path_under(prefix);
            match field {
                SchemaField::Leaf { display_name, .. } => {
                    if selection.is_selected(&path) {
                        self.push_line(out, depth, display_name);
                    }
                }
                SchemaField::Container {
                    display_name,
                    wrapping,
                    paginated,
                    children,
                    ..
                } => {
                    // The container's own flag is irrelevant, only leaves count
                    if !has_selected_leaf(field, prefix, selection) {
                        continue;
                    }

                    let opening = if *paginated {
                        format!("{}({}) {{", display_name, root.pagination_clause)
                    } else {
                        format!("{} {{", display_name)
                    };
                    self.push_line(out, depth, &opening);

                    match wrapping {
                        Wrapping::None => {
                            self.emit_fields(root, children, &path, depth + 1, selection, out);
                        }
                        Wrapping::NodeList => {
                            self.push_line(out, depth + 1, "nodes {");
                            self.emit_fields(root, children, &path, depth + 2, selection, out);
                            self.push_line(out, depth + 1, "}");
                        }
                        Wrapping::EdgeNode => {
                            self.push_line(out, depth + 1, "edges {");
                            self.push_line(out, depth + 2, "node {");
                            self.emit_fields(root, children, &path, depth + 3, selection, out);
                            self.push_line(out, depth + 2, "}");
                            self.push_line(out, depth + 1, "}");
                        }
                    }

                    self.push_line(out, depth, "}");
                }
            }
        }
    }

    fn push_line(&self, out: &mut String, depth: usize, text: &str) {
        out.extend(std::iter::repeat_n(' ', depth * self.indent));
        out.push_str(text);
        out.push('\n');
    }
}

fn has_selected_leaf(field: &SchemaField, prefix: &str, selection: &SelectionState) -> bool {
    field
        .leaf_paths(prefix)
        .iter()
        .any(|path| selection.is_selected(path))
}
