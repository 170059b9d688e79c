//! # Construction Paths
//!
//! Every supported input format implements [`RecordSource`]: "build a Record
//! from format X". The registry is generic over the trait, so adding a format
//! means adding an implementation, never touching the registry.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Construction Pipeline                             │
//! │                                                                         │
//! │   Delimited ("Bob-65000-Sales", '-') ──┐                                │
//! │   serde_json::Map {"name", ...}  ──────┤                                │
//! │   serde_json::Value (object)     ──────┼──► RecordSource::build         │
//! │   CatalogLookup ("12345", &catalog) ───┘          │                     │
//! │                                                   ▼                     │
//! │                               build_record(name, amount, category)     │
//! │                                 • validate_name                        │
//! │                                 • validate_amount  (config bounds)     │
//! │                                 • validate_category (config pattern)   │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                        Ok(Record) / Err(CoreError)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this module touches a registry. Registration happens in
//! [`crate::registry::Registry`] after a source has built successfully.

use serde_json::{Map, Number, Value};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::registry::RegistryConfig;
use crate::types::Record;
use crate::validation::{validate_amount, validate_category, validate_name};
use crate::RECORD_FIELD_COUNT;

/// An input format a Record can be built from.
pub trait RecordSource {
    /// Parses and validates the input under `config`.
    fn build(&self, config: &RegistryConfig) -> CoreResult<Record>;
}

// =============================================================================
// Shared Builder
// =============================================================================

/// Validates already-parsed fields and produces a Record.
///
/// Name and category are trimmed before validation and storage.
pub fn build_record(
    name: &str,
    amount: Money,
    category: &str,
    config: &RegistryConfig,
) -> CoreResult<Record> {
    let name = name.trim();
    let category = category.trim();

    validate_name(name)?;
    validate_amount(amount, &config.amount_bounds)?;
    validate_category(category, config.category_pattern.as_ref())?;

    Ok(Record::new(name.to_string(), amount, category.to_string()))
}

/// Record amounts are rounded half away from zero to the cent.
fn parse_amount(raw: &str, input: &str) -> CoreResult<Money> {
    Money::parse_rounded(raw).map_err(|e| CoreError::format(input, format!("amount: {}", e)))
}

/// JSON floats print in exponent form past 1e16 or below 1e-5; those are
/// re-rendered as plain decimals before parsing.
fn json_amount(n: &Number) -> CoreResult<Money> {
    let raw = n.to_string();
    match n.as_f64() {
        Some(f) if raw.contains(['e', 'E']) => parse_amount(&format!("{:.3}", f), &raw),
        _ => parse_amount(&raw, &raw),
    }
}

// =============================================================================
// Delimited Text
// =============================================================================

/// `name<d>amount<d>category`, e.g. `"Bob Johnson-65000-Sales"`.
#[derive(Debug, Clone, Copy)]
pub struct Delimited<'a> {
    pub text: &'a str,
    pub delimiter: char,
}

impl<'a> Delimited<'a> {
    pub fn new(text: &'a str, delimiter: char) -> Self {
        Delimited { text, delimiter }
    }
}

impl RecordSource for Delimited<'_> {
    fn build(&self, config: &RegistryConfig) -> CoreResult<Record> {
        parse_delimited(self.text, self.delimiter, config)
    }
}

/// Splits `text` on `delimiter` into exactly three fields.
///
/// ## Errors
/// - `Format` when the field count is not 3 or the amount is not a decimal
/// - `Validation` when a parsed field fails its check
///
/// ```rust
/// use registrar_core::construct::parse_delimited;
/// use registrar_core::registry::RegistryConfig;
///
/// let config = RegistryConfig::default();
/// let record = parse_delimited("Bob Johnson-65000-Sales", '-', &config).unwrap();
/// assert_eq!(record.name(), "Bob Johnson");
/// assert_eq!(record.amount().dollars(), 65_000);
/// assert_eq!(record.category(), "Sales");
///
/// assert!(parse_delimited("Bob-65000", '-', &config).is_err());
/// ```
pub fn parse_delimited(text: &str, delimiter: char, config: &RegistryConfig) -> CoreResult<Record> {
    let fields: Vec<&str> = text.split(delimiter).collect();
    if fields.len() != RECORD_FIELD_COUNT {
        return Err(CoreError::format(
            text,
            format!(
                "expected {} fields separated by '{}', found {}",
                RECORD_FIELD_COUNT,
                delimiter,
                fields.len()
            ),
        ));
    }

    let amount = parse_amount(fields[1], text)?;
    build_record(fields[0], amount, fields[2], config)
}

// =============================================================================
// Key-Value Mapping
// =============================================================================

impl RecordSource for Map<String, Value> {
    fn build(&self, config: &RegistryConfig) -> CoreResult<Record> {
        parse_mapping(self, config)
    }
}

impl RecordSource for Value {
    fn build(&self, config: &RegistryConfig) -> CoreResult<Record> {
        parse_value(self, config)
    }
}

/// Reads the required keys `name`, `amount` and `category`.
///
/// A key holding JSON `null` counts as absent. `amount` may be a number or
/// a numeric string; `name` and `category` must be strings.
pub fn parse_mapping(data: &Map<String, Value>, config: &RegistryConfig) -> CoreResult<Record> {
    let name = required(data, "name")?;
    let amount = required(data, "amount")?;
    let category = required(data, "category")?;

    let name = as_text(name, "name")?;
    let amount = match amount {
        Value::Number(n) => json_amount(n)?,
        Value::String(s) => parse_amount(s, s)?,
        other => {
            return Err(CoreError::format(
                other.to_string(),
                "amount must be a number or numeric string",
            ))
        }
    };
    let category = as_text(category, "category")?;

    build_record(name, amount, category, config)
}

/// Like [`parse_mapping`], for an arbitrary JSON value that must be an object.
pub fn parse_value(value: &Value, config: &RegistryConfig) -> CoreResult<Record> {
    match value {
        Value::Object(map) => parse_mapping(map, config),
        other => Err(CoreError::format(other.to_string(), "expected a JSON object")),
    }
}

fn required<'a>(data: &'a Map<String, Value>, field: &str) -> CoreResult<&'a Value> {
    match data.get(field) {
        None | Some(Value::Null) => Err(CoreError::missing(field)),
        Some(value) => Ok(value),
    }
}

fn as_text<'a>(value: &'a Value, field: &str) -> CoreResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| CoreError::format(value.to_string(), format!("{} must be a string", field)))
}

// =============================================================================
// Catalog Lookup
// =============================================================================

/// A code resolved through a caller-supplied [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct CatalogLookup<'a> {
    pub code: &'a str,
    pub catalog: &'a Catalog,
}

impl RecordSource for CatalogLookup<'_> {
    fn build(&self, config: &RegistryConfig) -> CoreResult<Record> {
        let entry = self
            .catalog
            .lookup(self.code)
            .ok_or_else(|| CoreError::not_found("Catalog entry", self.code))?;
        build_record(&entry.name, entry.amount, &entry.category, config)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::AmountBounds;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_delimited_fields_match_inputs() {
        let config = RegistryConfig::default();
        let record = parse_delimited(" Alice Smith - 75000.50 - Engineering ", '-', &config).unwrap();

        assert_eq!(record.name(), "Alice Smith");
        assert_eq!(record.amount().cents(), 7_500_050);
        assert_eq!(record.category(), "Engineering");
    }

    #[test]
    fn test_delimited_custom_delimiter() {
        let config = RegistryConfig::default();
        let record = parse_delimited("Carol White|85000|Finance", '|', &config).unwrap();
        assert_eq!(record.name(), "Carol White");
    }

    #[test]
    fn test_delimited_wrong_field_count() {
        let config = RegistryConfig::default();
        for text in ["", "Alice", "Alice-75000", "Bob Johnson-65000-2021-06-01"] {
            let err = parse_delimited(text, '-', &config).unwrap_err();
            assert!(matches!(err, CoreError::Format { .. }), "{text}: {err}");
        }
    }

    #[test]
    fn test_delimited_unparseable_amount() {
        let config = RegistryConfig::default();
        let err = parse_delimited("Alice-lots-Engineering", '-', &config).unwrap_err();
        assert!(matches!(err, CoreError::Format { .. }));
    }

    #[test]
    fn test_delimited_out_of_bounds_is_validation_error() {
        let config = RegistryConfig::default();
        let err = parse_delimited("Dan-25000-Support", '-', &config).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_mapping_success_number_and_string_amounts() {
        let config = RegistryConfig::default();

        let data = object(json!({"name": "Carol White", "amount": 85000, "category": "Finance"}));
        assert_eq!(parse_mapping(&data, &config).unwrap().amount().dollars(), 85_000);

        let data = object(json!({"name": "Eve", "amount": "42000.25", "category": "Legal"}));
        assert_eq!(parse_mapping(&data, &config).unwrap().amount().cents(), 4_200_025);

        let data = object(json!({"name": "Frank", "amount": 50000.5, "category": "Ops"}));
        assert_eq!(parse_mapping(&data, &config).unwrap().amount().cents(), 5_000_050);
    }

    #[test]
    fn test_sub_cent_amounts_round_to_the_cent() {
        let config = RegistryConfig::default();

        let data = object(json!({"name": "Gail", "amount": 45000.125, "category": "Ops"}));
        assert_eq!(parse_mapping(&data, &config).unwrap().amount().cents(), 4_500_013);

        let data = object(json!({"name": "Hank", "amount": "45000.994", "category": "Ops"}));
        assert_eq!(parse_mapping(&data, &config).unwrap().amount().cents(), 4_500_099);

        let record = parse_delimited("Ivy-30000.004-Ops", '-', &config).unwrap();
        assert_eq!(record.amount(), Money::from_major(30_000));

        // Rounding happens before the bounds check
        let err = parse_delimited("Jon-29999.994-Ops", '-', &config).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_exponent_json_numbers() {
        let config = RegistryConfig {
            amount_bounds: AmountBounds::unbounded(),
            ..RegistryConfig::default()
        };

        let data = object(json!({"name": "Kim", "amount": 1e16, "category": "Ops"}));
        assert_eq!(
            parse_mapping(&data, &config).unwrap().amount(),
            Money::from_major(10_000_000_000_000_000)
        );

        let data = object(json!({"name": "Lee", "amount": 1e-7, "category": "Ops"}));
        assert_eq!(parse_mapping(&data, &config).unwrap().amount(), Money::zero());

        let data = object(json!({"name": "Max", "amount": 1e30, "category": "Ops"}));
        assert!(matches!(parse_mapping(&data, &config), Err(CoreError::Format { .. })));
    }

    #[test]
    fn test_mapping_missing_fields() {
        let config = RegistryConfig::default();

        let data = object(json!({"name": "Carol", "category": "Finance"}));
        let err = parse_mapping(&data, &config).unwrap_err();
        assert!(matches!(err, CoreError::MissingField { ref field } if field == "amount"));

        let data = object(json!({"name": "Carol", "amount": null, "category": "Finance"}));
        assert!(matches!(
            parse_mapping(&data, &config),
            Err(CoreError::MissingField { .. })
        ));

        let data = object(json!({"amount": 50000, "category": "Finance"}));
        assert!(matches!(
            parse_mapping(&data, &config),
            Err(CoreError::MissingField { ref field }) if field == "name"
        ));
    }

    #[test]
    fn test_mapping_wrong_types_are_format_errors() {
        let config = RegistryConfig::default();

        let data = object(json!({"name": "Carol", "amount": true, "category": "Finance"}));
        assert!(matches!(parse_mapping(&data, &config), Err(CoreError::Format { .. })));

        let data = object(json!({"name": 7, "amount": 50000, "category": "Finance"}));
        assert!(matches!(parse_mapping(&data, &config), Err(CoreError::Format { .. })));

        let data = object(json!({"name": "Carol", "amount": "fifty", "category": "Finance"}));
        assert!(matches!(parse_mapping(&data, &config), Err(CoreError::Format { .. })));
    }

    #[test]
    fn test_mapping_bounds() {
        let config = RegistryConfig::default();
        for (amount, ok) in [
            (29_999, false),
            (30_000, true),
            (500_000, true),
            (1_000_000, true),
            (1_000_001, false),
        ] {
            let data = object(json!({"name": "X", "amount": amount, "category": "Y"}));
            let result = parse_mapping(&data, &config);
            assert_eq!(result.is_ok(), ok, "amount {amount}");
            if !ok {
                assert!(matches!(result, Err(CoreError::Validation(_))));
            }
        }
    }

    #[test]
    fn test_value_must_be_object() {
        let config = RegistryConfig::default();
        assert!(matches!(
            parse_value(&json!(["Carol", 1, "X"]), &config),
            Err(CoreError::Format { .. })
        ));
        assert!(json!({"name": "Carol", "amount": 40000, "category": "X"})
            .build(&config)
            .is_ok());
    }

    #[test]
    fn test_category_pattern_applies_to_every_source() {
        let config = RegistryConfig {
            amount_bounds: AmountBounds::unbounded(),
            category_pattern: Some(crate::validation::sku_pattern().clone()),
            ..RegistryConfig::default()
        };

        assert!(Delimited::new("Mouse-29.99-ELC00001", '-').build(&config).is_ok());
        assert!(matches!(
            Delimited::new("Mouse-29.99-Electronics", '-').build(&config),
            Err(CoreError::Validation(ValidationError::PatternMismatch { .. }))
        ));
    }

    #[test]
    fn test_catalog_lookup() {
        let config = RegistryConfig {
            amount_bounds: AmountBounds::unbounded(),
            ..RegistryConfig::default()
        };
        let catalog = Catalog::sample();

        let record = CatalogLookup { code: "12345", catalog: &catalog }
            .build(&config)
            .unwrap();
        assert_eq!(record.name(), "Laptop");

        let err = CatalogLookup { code: "00000", catalog: &catalog }
            .build(&config)
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
