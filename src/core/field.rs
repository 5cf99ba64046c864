//! Schema field tree: leaves and containers

use serde::{Deserialize, Serialize};

/// How a container nests its children in emitted query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrapping {
    /// Children sit directly inside the container braces
    #[default]
    None,
    /// Children sit inside `edges { node { ... } }`
    EdgeNode,
    /// Children sit inside `nodes { ... }`
    NodeList,
}

/// A selectable node of a root's response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaField {
    /// A scalar field
    Leaf {
        id: String,
        display_name: String,
    },
    /// A nested object field
    Container {
        id: String,
        display_name: String,
        #[serde(default)]
        wrapping: Wrapping,
        /// Whether the root's pagination clause is appended to the opening
        #[serde(default)]
        paginated: bool,
        children: Vec<SchemaField>,
    },
}

impl SchemaField {
    /// A leaf whose emitted token is its id
    pub fn leaf(id: impl Into<String>) -> Self {
        let id = id.into();
        SchemaField::Leaf {
            display_name: id.clone(),
            id,
        }
    }

    /// A leaf emitted under a different token (aliases, fixed arguments)
    ///
    /// `SchemaField::aliased("speedAvg", "speedAvg: speed(agg: AVG)")`
    pub fn aliased(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        SchemaField::Leaf {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// A plain object container
    pub fn object(id: impl Into<String>, children: Vec<SchemaField>) -> Self {
        Self::container(id, Wrapping::None, children)
    }

    /// A connection container whose children live under `edges { node { } }`
    pub fn edges(id: impl Into<String>, children: Vec<SchemaField>) -> Self {
        Self::container(id, Wrapping::EdgeNode, children)
    }

    /// A connection container whose children live under `nodes { }`
    pub fn nodes(id: impl Into<String>, children: Vec<SchemaField>) -> Self {
        Self::container(id, Wrapping::NodeList, children)
    }

    fn container(id: impl Into<String>, wrapping: Wrapping, children: Vec<SchemaField>) -> Self {
        let id = id.into();
        SchemaField::Container {
            display_name: id.clone(),
            id,
            wrapping,
            paginated: false,
            children,
        }
    }

    /// Mark a container as requiring the root's pagination clause
    ///
    /// Has no effect on leaves.
    pub fn paginated(mut self) -> Self {
        if let SchemaField::Container { paginated, .. } = &mut self {
            *paginated = true;
        }
        self
    }

    pub fn id(&self) -> &str {
        match self {
            SchemaField::Leaf { id, .. } | SchemaField::Container { id, .. } => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SchemaField::Leaf { display_name, .. }
            | SchemaField::Container { display_name, .. } => display_name,
        }
    }

    /// Children in declaration order (empty for leaves)
    pub fn children(&self) -> &[SchemaField] {
        match self {
            SchemaField::Leaf { .. } => &[],
            SchemaField::Container { children, .. } => children,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, SchemaField::Container { .. })
    }

    /// Dotted path of this field under `prefix`
    pub fn path_under(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.id().to_string()
        } else {
            format!("{}.{}", prefix, self.id())
        }
    }

    /// Every leaf path beneath (or equal to) this field, in declaration order
    pub fn leaf_paths(&self, prefix: &str) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaf_paths(prefix, &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, prefix: &str, out: &mut Vec<String>) {
        let path = self.path_under(prefix);
        match self {
            SchemaField::Leaf { .. } => out.push(path),
            SchemaField::Container { children, .. } => {
                for child in children {
                    child.collect_leaf_paths(&path, out);
                }
            }
        }
    }

    /// Look up a descendant by a path relative to this field's children
    pub fn find(&self, relative_path: &str) -> Option<&SchemaField> {
        find_in(self.children(), relative_path)
    }
}

/// Resolve a dotted path against a list of sibling fields
pub fn find_in<'a>(fields: &'a [SchemaField], path: &str) -> Option<&'a SchemaField> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    let field = fields.iter().find(|f| f.id() == head)?;
    match rest {
        Some(rest) => field.find(rest),
        None => Some(field),
    }
}
