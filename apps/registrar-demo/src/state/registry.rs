//! # Registry State
//!
//! The registry and catalog the commands operate on.
//!
//! ## Thread Safety
//! The registry lives behind [`SharedRegistry`] (`Arc<Mutex<Registry>>`), so
//! every append, clear and configure is serialized. The catalog is
//! read-only after startup and needs no lock.

use registrar_core::{Catalog, CoreResult, SharedRegistry};

use super::ConfigState;

#[derive(Debug, Clone)]
pub struct RegistryState {
    registry: SharedRegistry,
    catalog: Catalog,
}

impl RegistryState {
    /// Creates an empty registry configured from `config`.
    pub fn new(config: &ConfigState, catalog: Catalog) -> CoreResult<Self> {
        Ok(RegistryState {
            registry: SharedRegistry::with_config(config.to_registry_config()?)?,
            catalog,
        })
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
