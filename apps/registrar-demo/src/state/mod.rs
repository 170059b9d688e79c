//! # State Module
//!
//! Application state, split by concern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │      ConfigState         │      │     RegistryState        │        │
//! │  │                          │ ───► │                          │        │
//! │  │  rate, bounds,           │      │  SharedRegistry          │        │
//! │  │  delimiter, pattern      │      │  (Arc<Mutex<Registry>>)  │        │
//! │  │  (read-only)             │      │  Catalog (read-only)     │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod registry;

pub use config::ConfigState;
pub use registry::RegistryState;
