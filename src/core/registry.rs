//! Schema registry: the static catalog of queryable roots

use super::error::QueryBuilderError;
use super::schema::SchemaRoot;
use indexmap::IndexMap;

/// Catalog of schema roots for one remote API
///
/// Roots are kept in registration order so a root selector can enumerate
/// them as authored, while lookups by id stay constant time.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    roots: IndexMap<String, SchemaRoot>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            roots: IndexMap::new(),
        }
    }

    pub fn from_roots(roots: impl IntoIterator<Item = SchemaRoot>) -> Self {
        let mut registry = Self::new();
        for root in roots {
            registry.register(root);
        }
        registry
    }

    /// Register a root
    ///
    /// A root with an id already present replaces the earlier one in place.
    pub fn register(&mut self, root: SchemaRoot) {
        if self.roots.contains_key(&root.id) {
            tracing::warn!(root = %root.id, "replacing already registered schema root");
        }
        self.roots.insert(root.id.clone(), root);
    }

    pub fn get(&self, id: &str) -> Option<&SchemaRoot> {
        self.roots.get(id)
    }

    /// Like [`get`](Self::get) but with a typed error
    pub fn require(&self, id: &str) -> Result<&SchemaRoot, QueryBuilderError> {
        self.get(id)
            .ok_or_else(|| QueryBuilderError::UnknownRoot(id.to_string()))
    }

    pub fn first(&self) -> Option<&SchemaRoot> {
        self.roots.values().next()
    }

    /// Roots in registration order
    pub fn roots(&self) -> impl Iterator<Item = &SchemaRoot> {
        self.roots.values()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.roots.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
