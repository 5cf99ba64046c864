//! Built-in schema catalogs for the identity and telemetry APIs

pub mod identity;
pub mod telemetry;

use crate::core::SchemaRegistry;

pub fn identity_registry() -> SchemaRegistry {
    SchemaRegistry::from_roots(identity::roots())
}

pub fn telemetry_registry() -> SchemaRegistry {
    SchemaRegistry::from_roots(telemetry::roots())
}
