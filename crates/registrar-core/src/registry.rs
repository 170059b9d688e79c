//! # Registry
//!
//! The in-memory collection of Records plus the configuration shared by all
//! of them. A `Registry` is an ordinary value owned by its caller; there is
//! no process-wide instance. Wrap it in [`crate::shared::SharedRegistry`]
//! when more than one thread needs it.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Registry                                        │
//! │                                                                         │
//! │  Construction (validate, then append)                                   │
//! │    from_delimited_string("Bob-65000-Sales", '-')                        │
//! │    from_mapping({"name", "amount", "category"})                         │
//! │    from_sequence_of_mappings([...])   all-or-nothing                    │
//! │    from_catalog("12345", &catalog)                                      │
//! │                                                                         │
//! │  Queries                      Mutation            Configuration         │
//! │    count()                      update_category     configure(rate)     │
//! │    average_amount()             clear()                                 │
//! │    total_amount()                                 Derived (never cached)│
//! │    find_by_category()                               price_with_adjustment│
//! │    get(id) / records()                              adjusted_amount     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use registrar_core::money::Money;
//! use registrar_core::registry::Registry;
//! use registrar_core::types::Rate;
//!
//! let mut registry = Registry::new();
//! let bob = registry.from_delimited_string("Bob Johnson-65000-Sales", '-').unwrap();
//! assert_eq!(registry.count(), 1);
//!
//! registry.configure(Some(Rate::from_fraction(0.10))).unwrap();
//! assert_eq!(registry.adjusted_amount(&bob).unwrap(), Money::from_major(71_500));
//! ```

use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::construct::{CatalogLookup, Delimited, RecordSource};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AmountBounds, Rate, Record};
use crate::validation::{validate_bounds, validate_category, validate_label, validate_rate_bps};
use crate::{DEFAULT_COMPANY_NAME, DEFAULT_DELIMITER};

// =============================================================================
// Configuration
// =============================================================================

/// Values shared by every record in a registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Rate applied by [`Registry::price_with_adjustment`].
    pub rate: Rate,

    /// Organization label shown with every record.
    pub company_name: String,

    /// Inclusive bounds every record amount must satisfy.
    pub amount_bounds: AmountBounds,

    /// Optional structural pattern every category must match.
    pub category_pattern: Option<Regex>,

    /// Delimiter used by [`Registry::from_delimited`].
    pub delimiter: char,
}

impl Default for RegistryConfig {
    /// 8% rate, `[30,000.00, 1,000,000.00]` bounds, no pattern, `-` delimiter.
    fn default() -> Self {
        RegistryConfig {
            rate: Rate::default(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            amount_bounds: AmountBounds::default(),
            category_pattern: None,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl RegistryConfig {
    /// Checks the rate range, the company name and that the bounds are
    /// not inverted.
    pub fn validate(&self) -> CoreResult<()> {
        validate_rate_bps(self.rate.bps())?;
        validate_label("company_name", &self.company_name)?;
        validate_bounds(&self.amount_bounds)?;
        Ok(())
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<Record>,
    config: RegistryConfig,
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Creates an empty registry with `config`, rejecting invalid values.
    pub fn with_config(config: RegistryConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Registry {
            records: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Construction paths
    // -------------------------------------------------------------------------

    /// Builds a record from any [`RecordSource`] and registers it.
    ///
    /// Nothing is registered when the build fails.
    pub fn register<S: RecordSource + ?Sized>(&mut self, source: &S) -> CoreResult<Record> {
        let record = source.build(&self.config)?;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Builds every source first and registers them only if all succeed.
    ///
    /// The first failure, in input order, is returned unchanged.
    pub fn register_all<S: RecordSource>(&mut self, sources: &[S]) -> CoreResult<Vec<Record>> {
        let built = sources
            .iter()
            .map(|source| source.build(&self.config))
            .collect::<CoreResult<Vec<Record>>>()?;

        self.records.extend(built.iter().cloned());
        Ok(built)
    }

    /// Parses `name<d>amount<d>category` and registers the result.
    pub fn from_delimited_string(&mut self, text: &str, delimiter: char) -> CoreResult<Record> {
        self.register(&Delimited::new(text, delimiter))
    }

    /// [`Self::from_delimited_string`] with the configured delimiter.
    pub fn from_delimited(&mut self, text: &str) -> CoreResult<Record> {
        let delimiter = self.config.delimiter;
        self.from_delimited_string(text, delimiter)
    }

    /// Reads `name`, `amount` and `category` from a JSON object and
    /// registers the result.
    pub fn from_mapping(&mut self, data: &Map<String, Value>) -> CoreResult<Record> {
        self.register(data)
    }

    /// Applies [`Self::from_mapping`] to every item, all-or-nothing.
    ///
    /// ```rust
    /// use registrar_core::registry::Registry;
    /// use serde_json::json;
    ///
    /// let items: Vec<_> = [
    ///     json!({"name": "Ann", "amount": 40000, "category": "Ops"}),
    ///     json!({"name": "Ben", "amount": 10, "category": "Ops"}), // below bounds
    /// ]
    /// .into_iter()
    /// .filter_map(|v| v.as_object().cloned())
    /// .collect();
    ///
    /// let mut registry = Registry::new();
    /// assert!(registry.from_sequence_of_mappings(&items).is_err());
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn from_sequence_of_mappings(
        &mut self,
        items: &[Map<String, Value>],
    ) -> CoreResult<Vec<Record>> {
        self.register_all(items)
    }

    /// Resolves `code` through `catalog` and registers the result.
    pub fn from_catalog(&mut self, code: &str, catalog: &Catalog) -> CoreResult<Record> {
        self.register(&CatalogLookup { code, catalog })
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[inline]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean of all amounts, rounded to the cent. Zero when empty.
    pub fn average_amount(&self) -> Money {
        Money::mean(self.records.iter().map(Record::amount))
    }

    /// Sum of all amounts.
    ///
    /// ## Errors
    /// `Overflow` when the sum does not fit, which wide amount bounds allow.
    pub fn total_amount(&self) -> CoreResult<Money> {
        Money::checked_sum(self.records.iter().map(Record::amount))
            .ok_or_else(|| CoreError::overflow("total_amount"))
    }

    /// Records whose category equals `category`, in registration order.
    pub fn find_by_category(&self, category: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.category() == category)
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// All records in registration order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Replaces the category of one record.
    ///
    /// The new category goes through the same check as at construction.
    pub fn update_category(&mut self, id: Uuid, category: &str) -> CoreResult<&Record> {
        let category = category.trim();
        validate_category(category, self.config.category_pattern.as_ref())?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| CoreError::not_found("Record", id.to_string()))?;

        record.set_category(category.to_string());
        Ok(record)
    }

    /// Removes every record. Configuration is kept.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    // -------------------------------------------------------------------------
    // Configuration & derived values
    // -------------------------------------------------------------------------

    /// Overwrites the shared rate when `rate` is `Some`; `None` is a no-op.
    pub fn configure(&mut self, rate: Option<Rate>) -> CoreResult<()> {
        if let Some(rate) = rate {
            validate_rate_bps(rate.bps())?;
            self.config.rate = rate;
        }
        Ok(())
    }

    /// Replaces the company name shown with every record.
    pub fn set_company_name(&mut self, name: &str) -> CoreResult<()> {
        let name = name.trim();
        validate_label("company_name", name)?;
        self.config.company_name = name.to_string();
        Ok(())
    }

    pub fn company_name(&self) -> &str {
        &self.config.company_name
    }

    /// One-line summary of a record under this registry's company name,
    /// e.g. `Record('Alice', $75,000.00, Registrar)`.
    pub fn describe(&self, record: &Record) -> String {
        format!(
            "Record('{}', {}, {})",
            record.name(),
            record.amount().format_grouped(),
            self.config.company_name
        )
    }

    /// The rate currently in force.
    #[inline]
    pub fn rate(&self) -> Rate {
        self.config.rate
    }

    /// `base × (1 + rate)` using the rate in force right now.
    ///
    /// ## Errors
    /// `Overflow` when the adjusted amount does not fit.
    pub fn price_with_adjustment(&self, base: Money) -> CoreResult<Money> {
        base.with_adjustment(self.config.rate)
            .ok_or_else(|| CoreError::overflow("price_with_adjustment"))
    }

    /// [`Self::price_with_adjustment`] applied to a record's amount.
    pub fn adjusted_amount(&self, record: &Record) -> CoreResult<Money> {
        self.price_with_adjustment(record.amount())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;

    fn permissive() -> Registry {
        Registry::with_config(RegistryConfig {
            amount_bounds: AmountBounds::new(Money::zero(), Money::from_major(1_000_000)),
            ..RegistryConfig::default()
        })
        .unwrap()
    }

    fn mappings(values: Vec<Value>) -> Vec<Map<String, Value>> {
        values
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                _ => panic!("fixture must be an object"),
            })
            .collect()
    }

    #[test]
    fn test_successful_construction_registers() {
        let mut registry = Registry::new();
        let record = registry
            .from_delimited_string("Bob Johnson-65000-Sales", '-')
            .unwrap();

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get(record.id()), Some(&record));
    }

    #[test]
    fn test_failed_construction_registers_nothing() {
        let mut registry = Registry::new();
        assert!(registry.from_delimited_string("Bob-65000", '-').is_err());
        assert!(registry.from_delimited_string("Bob-100-Sales", '-').is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_delimited_uses_configured_delimiter() {
        let mut registry = Registry::with_config(RegistryConfig {
            delimiter: ',',
            ..RegistryConfig::default()
        })
        .unwrap();

        let record = registry.from_delimited("Carol,85000,Finance").unwrap();
        assert_eq!(record.category(), "Finance");
    }

    #[test]
    fn test_average_amount() {
        let mut registry = permissive();
        assert_eq!(registry.average_amount(), Money::zero());

        for text in ["A-10-X", "B-20-X", "C-30-Y"] {
            registry.from_delimited(text).unwrap();
        }
        assert_eq!(registry.average_amount(), Money::from_major(20));
        assert_eq!(registry.total_amount().unwrap(), Money::from_major(60));
    }

    #[test]
    fn test_price_with_adjustment_reflects_current_rate() {
        let mut registry = Registry::new();

        registry.configure(Some(Rate::from_fraction(0.08))).unwrap();
        assert_eq!(
            registry.price_with_adjustment(Money::from_major(100)).unwrap(),
            Money::from_major(108)
        );

        registry.configure(Some(Rate::from_fraction(0.10))).unwrap();
        assert_eq!(
            registry.price_with_adjustment(Money::from_major(100)).unwrap(),
            Money::from_major(110)
        );
    }

    #[test]
    fn test_adjusted_amount_is_not_cached() {
        let mut registry = Registry::new();
        let record = registry.from_delimited("Alice-50000-Eng").unwrap();

        registry.configure(Some(Rate::from_bps(800))).unwrap();
        assert_eq!(registry.adjusted_amount(&record).unwrap(), Money::from_major(54_000));

        registry.configure(Some(Rate::zero())).unwrap();
        assert_eq!(registry.adjusted_amount(&record).unwrap(), Money::from_major(50_000));
    }

    #[test]
    fn test_price_with_adjustment_overflow_is_an_error() {
        let registry = Registry::new();
        let largest = Money::from_cents(i64::MAX);

        assert!(matches!(
            registry.price_with_adjustment(largest),
            Err(CoreError::Overflow { .. })
        ));
        assert_eq!(
            registry.price_with_adjustment(Money::from_cents(-10_000)).unwrap(),
            Money::from_cents(-10_800)
        );
    }

    #[test]
    fn test_total_amount_overflow_is_an_error() {
        let mut registry = Registry::with_config(RegistryConfig {
            amount_bounds: AmountBounds::unbounded(),
            ..RegistryConfig::default()
        })
        .unwrap();

        registry.from_delimited("A-90000000000000000-X").unwrap();
        assert_eq!(
            registry.total_amount().unwrap(),
            Money::from_major(90_000_000_000_000_000)
        );

        registry.from_delimited("B-90000000000000000-X").unwrap();
        assert!(matches!(
            registry.total_amount(),
            Err(CoreError::Overflow { .. })
        ));
        assert_eq!(
            registry.average_amount(),
            Money::from_major(90_000_000_000_000_000)
        );
    }

    #[test]
    fn test_configure_none_is_noop_and_rejects_out_of_range() {
        let mut registry = Registry::new();
        registry.configure(Some(Rate::from_bps(1234))).unwrap();
        registry.configure(None).unwrap();
        assert_eq!(registry.rate().bps(), 1234);

        let err = registry.configure(Some(Rate::from_bps(10_001))).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(registry.rate().bps(), 1234);
    }

    #[test]
    fn test_batch_all_or_nothing() {
        let mut registry = Registry::new();
        let items = mappings(vec![
            json!({"name": "Ann", "amount": 40000, "category": "Ops"}),
            json!({"name": "Ben", "amount": 50000, "category": "Ops"}),
            json!({"name": "Cat", "amount": 10, "category": "Ops"}),
            json!({"name": "Dov", "amount": 60000, "category": "Ops"}),
        ]);

        let err = registry.from_sequence_of_mappings(&items).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_batch_reports_first_error() {
        let mut registry = Registry::new();
        let items = mappings(vec![
            json!({"name": "Ann", "amount": 40000, "category": "Ops"}),
            json!({"name": "Ben", "category": "Ops"}),
            json!({"name": "Cat", "amount": 10, "category": "Ops"}),
        ]);

        let err = registry.from_sequence_of_mappings(&items).unwrap_err();
        assert!(matches!(err, CoreError::MissingField { .. }));
    }

    #[test]
    fn test_batch_success_preserves_order() {
        let mut registry = Registry::new();
        let items = mappings(vec![
            json!({"name": "Notebook Buyer", "amount": 35000, "category": "Office"}),
            json!({"name": "Pen Buyer", "amount": 45000, "category": "Office"}),
        ]);

        let built = registry.from_sequence_of_mappings(&items).unwrap();
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].name(), "Notebook Buyer");
        assert_eq!(registry.records()[1].name(), "Pen Buyer");
    }

    #[test]
    fn test_from_catalog() {
        let mut registry = permissive();
        let catalog = Catalog::sample();

        let laptop = registry.from_catalog("12345", &catalog).unwrap();
        assert_eq!(laptop.amount().cents(), 99_999);
        assert!(matches!(
            registry.from_catalog("nope", &catalog),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_find_by_category() {
        let mut registry = permissive();
        registry.from_delimited("Mouse-29.99-Electronics").unwrap();
        registry.from_delimited("Notebook-5.99-Office").unwrap();
        registry.from_delimited("Laptop-999.99-Electronics").unwrap();

        let electronics = registry.find_by_category("Electronics");
        assert_eq!(electronics.len(), 2);
        assert_eq!(electronics[1].name(), "Laptop");
        assert!(registry.find_by_category("Garden").is_empty());
    }

    #[test]
    fn test_update_category() {
        let mut registry = Registry::new();
        let record = registry.from_delimited("Alice-75000-Engineering").unwrap();

        let updated = registry.update_category(record.id(), " Management ").unwrap();
        assert_eq!(updated.category(), "Management");
        assert_eq!(updated.name(), "Alice");
        assert_eq!(updated.amount(), record.amount());

        assert!(matches!(
            registry.update_category(Uuid::new_v4(), "Ops"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            registry.update_category(record.id(), ""),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_clear_keeps_configuration() {
        let mut registry = Registry::new();
        registry.configure(Some(Rate::from_bps(500))).unwrap();
        registry.from_delimited("Alice-75000-Engineering").unwrap();

        registry.clear();
        assert_eq!(registry.count(), 0);
        assert_eq!(registry.average_amount(), Money::zero());
        assert_eq!(registry.rate().bps(), 500);
    }

    #[test]
    fn test_company_name_is_shared_by_every_record() {
        let mut registry = Registry::new();
        let alice = registry.from_delimited("Alice-75000-Engineering").unwrap();
        let bob = registry.from_delimited("Bob-65000-Sales").unwrap();
        assert_eq!(registry.company_name(), "Registrar");

        registry.set_company_name("  Acme Corp ").unwrap();
        assert_eq!(registry.describe(&alice), "Record('Alice', $75,000.00, Acme Corp)");
        assert_eq!(registry.describe(&bob), "Record('Bob', $65,000.00, Acme Corp)");

        assert!(matches!(
            registry.set_company_name("   "),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert_eq!(registry.company_name(), "Acme Corp");

        registry.clear();
        assert_eq!(registry.company_name(), "Acme Corp");
    }

    #[test]
    fn test_with_config_rejects_blank_company_name() {
        let result = Registry::with_config(RegistryConfig {
            company_name: String::new(),
            ..RegistryConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_with_config_rejects_inverted_bounds() {
        let result = Registry::with_config(RegistryConfig {
            amount_bounds: AmountBounds::new(Money::from_major(10), Money::zero()),
            ..RegistryConfig::default()
        });
        assert!(result.is_err());
    }
}
