//! # Registrar Demo Library
//!
//! Wires logging, configuration and state together and runs the walkthrough.
//!
//! ## Module Organization
//! ```text
//! registrar_demo/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Environment-driven configuration
//! │   └── registry.rs ◄─── Shared registry + catalog
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── record.rs   ◄─── Import/list/update commands
//! │   ├── pricing.rs  ◄─── Rate, price and summary commands
//! │   └── config.rs   ◄─── Configuration command
//! ├── walkthrough.rs  ◄─── Scripted tour over the commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod walkthrough;

use std::process::ExitCode;

use registrar_core::Catalog;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{ConfigState, RegistryState};

/// Runs the walkthrough and prints its output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ──► tracing-subscriber, RUST_LOG overrides       │
/// │  2. Load Configuration ──► REGISTRAR_* env vars over defaults           │
/// │  3. Build State ─────────► RegistryState (registry + sample catalog)    │
/// │  4. Run Walkthrough ─────► print each section                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    info!("Starting registrar walkthrough");

    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, message = %err.message, "Walkthrough failed");
            ExitCode::FAILURE
        }
    }
}

fn start() -> Result<(), ApiError> {
    let config = ConfigState::from_env();
    info!(
        company = %config.company_name,
        rate_bps = config.rate_bps,
        min = %config.min_amount,
        max = %config.max_amount,
        "Configuration loaded"
    );

    let state = RegistryState::new(&config, Catalog::sample())?;

    for section in walkthrough::run_all(&state, &config)? {
        println!("== {} ==", section.title);
        for line in &section.lines {
            println!("  {}", line);
        }
        println!();
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=registrar_demo=trace` - Trace this crate only
/// - Default: INFO, DEBUG for this crate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,registrar_demo=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
