//! # Shared Registry
//!
//! A cloneable, thread-safe handle around one [`Registry`].
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SharedRegistry = Arc<Mutex<Registry>>                                  │
//! │                                                                         │
//! │  thread A ── with_registry_mut(|r| r.from_mapping(..)) ──┐              │
//! │  thread B ── with_registry_mut(|r| r.configure(..)) ─────┼─► one at a   │
//! │  thread C ── with_registry(|r| r.average_amount()) ──────┘   time       │
//! │                                                                         │
//! │  Append, clear and configure all hold the lock for their full duration.│
//! │  A batch import therefore commits atomically with respect to readers.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A poisoned lock is recovered by taking the inner value. Registry
//! operations validate before they mutate, so a panic inside a closure
//! cannot leave a half-applied batch behind.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::CoreResult;
use crate::registry::{Registry, RegistryConfig};

#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    pub fn new(registry: Registry) -> Self {
        SharedRegistry {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Creates a shared, empty registry with `config`.
    pub fn with_config(config: RegistryConfig) -> CoreResult<Self> {
        Ok(SharedRegistry::new(Registry::with_config(config)?))
    }

    /// Runs `f` with read access to the registry.
    ///
    /// ```rust
    /// use registrar_core::shared::SharedRegistry;
    ///
    /// let shared = SharedRegistry::default();
    /// assert_eq!(shared.with_registry(|r| r.count()), 0);
    /// ```
    pub fn with_registry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Registry) -> R,
    {
        let registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&registry)
    }

    /// Runs `f` with exclusive write access to the registry.
    ///
    /// ```rust
    /// use registrar_core::shared::SharedRegistry;
    ///
    /// let shared = SharedRegistry::default();
    /// shared
    ///     .with_registry_mut(|r| r.from_delimited("Alice-75000-Engineering"))
    ///     .unwrap();
    /// assert_eq!(shared.with_registry(|r| r.count()), 1);
    /// ```
    pub fn with_registry_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Registry) -> R,
    {
        let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }
}
