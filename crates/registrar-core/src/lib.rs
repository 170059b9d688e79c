//! # registrar-core: Record Factory & Registry
//!
//! Builds typed records from heterogeneous inputs, validates them, and keeps
//! them in a caller-owned registry that answers aggregate queries.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Registrar Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 registrar-demo (app)                            │   │
//! │  │   tracing • env config • commands • walkthrough                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ registrar-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────────┐  │   │
//! │  │  │construct │ │ registry │ │validation │ │ money / types    │  │   │
//! │  │  │ sources  │ │ queries  │ │ predicates│ │ Money, Rate,     │  │   │
//! │  │  │          │ │ config   │ │           │ │ Record           │  │   │
//! │  │  └──────────┘ └──────────┘ └───────────┘ └──────────────────┘  │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌───────────┐                        │   │
//! │  │  │  shared  │ │ catalog  │ │ pricing / │                        │   │
//! │  │  │  (lock)  │ │ lookups  │ │ dates     │                        │   │
//! │  │  └──────────┘ └──────────┘ └───────────┘                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record, Rate, AmountBounds
//! - [`money`] - Integer money with exact decimal parsing
//! - [`error`] - CoreError and ValidationError
//! - [`validation`] - Range and pattern predicates
//! - [`construct`] - The `RecordSource` construction paths
//! - [`registry`] - The registry and its configuration
//! - [`shared`] - Mutex-guarded registry handle for concurrent callers
//! - [`catalog`] - Code → record lookup table
//! - [`pricing`] - Discount, bonus and currency formatting helpers
//! - [`dates`] - Business-day and date parsing helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use registrar_core::{Money, Rate, Registry};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//!
//! registry.from_delimited_string("Bob Johnson-65000-Sales", '-').unwrap();
//! let data = json!({"name": "Carol White", "amount": 85000, "category": "Finance"});
//! registry.from_mapping(data.as_object().unwrap()).unwrap();
//!
//! assert_eq!(registry.count(), 2);
//! assert_eq!(registry.average_amount(), Money::from_major(75_000));
//!
//! registry.configure(Some(Rate::from_fraction(0.08))).unwrap();
//! assert_eq!(
//!     registry.price_with_adjustment(Money::from_major(100)).unwrap(),
//!     Money::from_major(108)
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod construct;
pub mod dates;
pub mod error;
pub mod money;
pub mod pricing;
pub mod registry;
pub mod shared;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogEntry};
pub use construct::RecordSource;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use registry::{Registry, RegistryConfig};
pub use shared::SharedRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fields in a delimited record: name, amount, category.
pub const RECORD_FIELD_COUNT: usize = 3;

/// Default delimiter for delimited records.
pub const DEFAULT_DELIMITER: char = '-';

/// Default label shared by every record in a registry.
pub const DEFAULT_COMPANY_NAME: &str = "Registrar";

/// Default shared rate: 8%.
pub const DEFAULT_RATE_BPS: u32 = 800;

/// Default lower amount bound, in whole units.
pub const DEFAULT_MIN_AMOUNT: i64 = 30_000;

/// Default upper amount bound, in whole units.
pub const DEFAULT_MAX_AMOUNT: i64 = 1_000_000;

/// Longest accepted record name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Three uppercase letters followed by five digits.
pub const SKU_PATTERN: &str = r"^[A-Z]{3}[0-9]{5}$";
