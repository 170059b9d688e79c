//! # Configuration State
//!
//! Registry configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`REGISTRAR_*`)
//! 2. Defaults (this file)
//!
//! Unparseable environment values are logged and ignored; the default for
//! that field stays in force.

use registrar_core::validation::compile_pattern;
use registrar_core::{AmountBounds, CoreResult, Money, Rate, RegistryConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shared rate in basis points (800 = 8%)
    pub rate_bps: u32,

    /// Organization label shown with every record
    pub company_name: String,

    /// Lowest accepted record amount
    pub min_amount: Money,

    /// Highest accepted record amount
    pub max_amount: Money,

    /// Delimiter for delimited record text
    pub delimiter: char,

    /// Optional regex every category must match
    pub category_pattern: Option<String>,
}

impl Default for ConfigState {
    /// 8% rate, "Registrar", amounts between 30,000 and 1,000,000,
    /// `-` delimiter, no category pattern.
    fn default() -> Self {
        let core = RegistryConfig::default();
        ConfigState {
            rate_bps: core.rate.bps(),
            company_name: core.company_name,
            min_amount: core.amount_bounds.min,
            max_amount: core.amount_bounds.max,
            delimiter: core.delimiter,
            category_pattern: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `REGISTRAR_RATE`: rate as a percentage (e.g. "8.25")
    /// - `REGISTRAR_COMPANY_NAME`: label shown with every record
    /// - `REGISTRAR_MIN_AMOUNT` / `REGISTRAR_MAX_AMOUNT`: decimal amounts
    /// - `REGISTRAR_DELIMITER`: a single character
    /// - `REGISTRAR_CATEGORY_PATTERN`: regex for categories
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(raw) = lookup("REGISTRAR_RATE") {
            match raw.trim().parse::<f64>() {
                Ok(pct) if pct >= 0.0 => config.rate_bps = Rate::from_percentage(pct).bps(),
                _ => warn!(value = %raw, "Ignoring invalid REGISTRAR_RATE"),
            }
        }

        if let Some(raw) = lookup("REGISTRAR_COMPANY_NAME") {
            match raw.trim() {
                "" => warn!("Ignoring empty REGISTRAR_COMPANY_NAME"),
                name => config.company_name = name.to_string(),
            }
        }

        if let Some(raw) = lookup("REGISTRAR_MIN_AMOUNT") {
            match raw.parse::<Money>() {
                Ok(amount) => config.min_amount = amount,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid REGISTRAR_MIN_AMOUNT"),
            }
        }

        if let Some(raw) = lookup("REGISTRAR_MAX_AMOUNT") {
            match raw.parse::<Money>() {
                Ok(amount) => config.max_amount = amount,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid REGISTRAR_MAX_AMOUNT"),
            }
        }

        if let Some(raw) = lookup("REGISTRAR_DELIMITER") {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(delimiter), None) => config.delimiter = delimiter,
                _ => warn!(value = %raw, "Ignoring REGISTRAR_DELIMITER: expected one character"),
            }
        }

        if let Some(raw) = lookup("REGISTRAR_CATEGORY_PATTERN") {
            if !raw.trim().is_empty() {
                config.category_pattern = Some(raw);
            }
        }

        config
    }

    /// Builds the core registry configuration.
    ///
    /// ## Errors
    /// A category pattern that is not a valid regex, a rate above 100%, or
    /// a minimum above the maximum.
    pub fn to_registry_config(&self) -> CoreResult<RegistryConfig> {
        let category_pattern = self
            .category_pattern
            .as_deref()
            .map(|p| compile_pattern("category_pattern", p))
            .transpose()?;

        let config = RegistryConfig {
            rate: Rate::from_bps(self.rate_bps),
            company_name: self.company_name.clone(),
            amount_bounds: AmountBounds::new(self.min_amount, self.max_amount),
            category_pattern,
            delimiter: self.delimiter,
        };
        config.validate()?;
        Ok(config)
    }
}
