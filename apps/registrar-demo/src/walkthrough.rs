//! # Walkthrough
//!
//! A scripted tour of the registry, driven entirely through the command
//! layer. Each section collects its output lines so the binary can print
//! them and the tests can inspect them.
//!
//! ## Sections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0. Config    the effective configuration                               │
//! │  1. Records   delimited, mapping and batch imports; rejected inputs     │
//! │  2. Pricing   rate changes, adjusted prices, discounts, bonuses         │
//! │  3. Catalog   code lookups and SKU checks                               │
//! │  4. Dates     business days, flexible parsing, relative times           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDate, Utc};
use registrar_core::dates::{business_days_between, format_relative_time, parse_flexible_date};
use registrar_core::validation::is_valid_sku;

use crate::commands::{config, pricing, record};
use crate::error::ApiError;
use crate::state::{ConfigState, RegistryState};

/// One titled block of walkthrough output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
}

impl Section {
    fn new(title: &'static str) -> Self {
        Section {
            title,
            lines: Vec::new(),
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }
}

/// Runs every section against `state`, stopping at the first unexpected error.
///
/// Expected rejections (the demonstrations of invalid input) are reported
/// as lines, not errors.
pub fn run_all(state: &RegistryState, config: &ConfigState) -> Result<Vec<Section>, ApiError> {
    Ok(vec![
        configuration(config),
        records(state)?,
        pricing_section(state)?,
        catalog(state),
        dates(),
    ])
}

fn configuration(current: &ConfigState) -> Section {
    let mut section = Section::new("Configuration");
    let effective = config::get_config(current);

    section.line(format!("Company: {}", effective.company_name));
    section.line(format!("Rate: {}%", f64::from(effective.rate_bps) / 100.0));
    section.line(format!(
        "Amounts: {} to {}",
        effective.min_amount.format_grouped(),
        effective.max_amount.format_grouped()
    ));
    section.line(format!("Delimiter: '{}'", effective.delimiter));
    section.line(format!(
        "Category pattern: {}",
        effective.category_pattern.as_deref().unwrap_or("none")
    ));

    section
}

fn records(state: &RegistryState) -> Result<Section, ApiError> {
    let mut section = Section::new("Records");

    let bob = record::import_delimited(state, "Bob Johnson-65000-Sales", None)?;
    section.line(format!("Delimited: {} ({}) in {}", bob.name, bob.amount, bob.category));
    section.line(format!("Described: {}", record::describe_record(state, &bob.id)?));

    let carol = record::import_mapping(
        state,
        r#"{"name": "Carol White", "amount": 85000, "category": "Finance"}"#,
    )?;
    section.line(format!("Mapping: {} ({}) in {}", carol.name, carol.amount, carol.category));

    let batch = record::import_batch(
        state,
        r#"[
            {"name": "Alice Smith", "amount": 75000, "category": "Engineering"},
            {"name": "David Lee", "amount": "95000.50", "category": "Engineering"}
        ]"#,
    )?;
    section.line(format!("Batch: {} records imported", batch.len()));

    if let Err(err) = record::import_delimited(state, "Eve-12-Sales", None) {
        section.line(format!("Rejected: {}", err.message));
    }

    if let Err(err) = record::import_batch(
        state,
        r#"[
            {"name": "Frank", "amount": 50000, "category": "Ops"},
            {"name": "Grace", "category": "Ops"}
        ]"#,
    ) {
        section.line(format!("Rejected batch: {}", err.message));
    }

    let summary = pricing::get_summary(state)?;
    section.line(format!(
        "Count: {}, total {}, average {}",
        summary.count, summary.total, summary.average
    ));

    let engineering = record::list_by_category(state, "Engineering");
    section.line(format!("Engineering: {} records", engineering.len()));

    Ok(section)
}

fn pricing_section(state: &RegistryState) -> Result<Section, ApiError> {
    let mut section = Section::new("Pricing");

    let quote = pricing::price_with_adjustment(state, "100")?;
    section.line(format!("{} at the default rate: {}", quote.base, quote.adjusted));

    let bps = pricing::configure_rate(state, Some(10.0))?;
    let quote = pricing::price_with_adjustment(state, "100")?;
    section.line(format!(
        "{} at {}%: {}",
        quote.base,
        f64::from(bps) / 100.0,
        quote.adjusted
    ));

    let quote = pricing::quote_discount("99.99", 20)?;
    section.line(format!("{} with 20% off: {}", quote.base, quote.adjusted));

    if let Some(first) = record::list_records(state).first() {
        let quote = pricing::quote_bonus(state, &first.id, 4)?;
        section.line(format!(
            "Bonus for {} at rating 4: {}",
            first.name, quote.adjusted
        ));
    }

    Ok(section)
}

fn catalog(state: &RegistryState) -> Section {
    let mut section = Section::new("Catalog");

    for code in ["12345", "67890", "99999"] {
        match state.catalog().lookup(code) {
            Some(entry) => section.line(format!(
                "{}: {} ({}) in {}",
                code, entry.name, entry.amount, entry.category
            )),
            None => section.line(format!("{}: not in catalog", code)),
        }
    }

    match record::import_from_catalog(state, "12345") {
        Ok(dto) => section.line(format!("Registered {}", dto.name)),
        Err(err) => section.line(format!("Not registered: {}", err.message)),
    }

    for sku in ["ABC12345", "abc12345", "AB123456"] {
        section.line(format!("SKU {}: valid = {}", sku, is_valid_sku(sku)));
    }

    section
}

fn dates() -> Section {
    let mut section = Section::new("Dates");

    if let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 31),
    ) {
        section.line(format!(
            "Business days in January 2024: {}",
            business_days_between(start, end)
        ));
    }

    for text in ["2024-03-15", "03/15/2024", "15-03-2024", "March 15"] {
        match parse_flexible_date(text) {
            Some(date) => section.line(format!("{:?} parses as {}", text, date)),
            None => section.line(format!("{:?} is not a recognized date", text)),
        }
    }

    let now = Utc::now();
    section.line(format!(
        "Three hours ago: {}",
        format_relative_time(now - Duration::hours(3), now)
    ));

    section
}
