//! Configuration loading and management

use crate::catalog;
use crate::core::{SchemaRegistry, SchemaRoot};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const IDENTITY_ENDPOINT: &str = "https://identity-api.dimo.zone/query";
pub const TELEMETRY_ENDPOINT: &str = "https://telemetry-api.dimo.zone/query";

/// Description of one remote query API and its schema catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Display name (e.g., "identity")
    pub name: String,

    /// URL queries are POSTed to
    pub endpoint: String,

    /// Whether requests must carry a bearer token
    #[serde(default)]
    pub requires_auth: bool,

    /// Queryable roots, in selector order
    pub roots: Vec<SchemaRoot>,
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject catalogs a registry could not represent faithfully
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            bail!("API '{}' declares no schema roots", self.name);
        }

        let mut seen = HashSet::new();
        for root in &self.roots {
            if !seen.insert(root.id.as_str()) {
                bail!("Duplicate schema root id '{}' in API '{}'", root.id, self.name);
            }

            let mut params = HashSet::new();
            for param in &root.parameters {
                if !params.insert(param.name.as_str()) {
                    bail!(
                        "Duplicate parameter '{}' on root '{}'",
                        param.name,
                        root.id
                    );
                }
            }
        }

        Ok(())
    }

    /// Build the registry for this API's roots
    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::from_roots(self.roots.iter().cloned())
    }

    /// Default identity API configuration (public, no token)
    pub fn identity() -> Self {
        Self {
            name: "identity".to_string(),
            endpoint: IDENTITY_ENDPOINT.to_string(),
            requires_auth: false,
            roots: catalog::identity::roots(),
        }
    }

    /// Default telemetry API configuration (bearer token required)
    pub fn telemetry() -> Self {
        Self {
            name: "telemetry".to_string(),
            endpoint: TELEMETRY_ENDPOINT.to_string(),
            requires_auth: true,
            roots: catalog::telemetry::roots(),
        }
    }
}

/// Settings for one execution adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub endpoint: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    concat!("vehicle-query-builder/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ExecutorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: default_user_agent(),
        }
    }
}

impl From<&ApiConfig> for ExecutorConfig {
    fn from(api: &ApiConfig) -> Self {
        Self::new(api.endpoint.clone())
    }
}
