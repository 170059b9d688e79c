//! # Catalog
//!
//! A caller-owned lookup table from a code (barcode, SKU) to the fields of a
//! record. Used by the catalog construction path; the table itself is never
//! global.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// The fields a catalog code resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub amount: Money,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Adds or replaces the entry for `code`. Returns `self` for chaining.
    pub fn with_entry(
        mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        self.insert(code, name, amount, category);
        self
    }

    /// Adds or replaces the entry for `code`, returning the previous one.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Option<CatalogEntry> {
        self.entries.insert(
            code.into(),
            CatalogEntry {
                name: name.into(),
                amount,
                category: category.into(),
            },
        )
    }

    /// Looks a code up, ignoring surrounding whitespace.
    pub fn lookup(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.get(code.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A two-item catalog (laptop, coffee mug) for demos and tests.
    pub fn sample() -> Self {
        Catalog::new()
            .with_entry("12345", "Laptop", Money::from_cents(99_999), "Electronics")
            .with_entry("67890", "Coffee Mug", Money::from_cents(1_299), "Kitchen")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("67890").unwrap().name, "Coffee Mug");
        assert_eq!(catalog.lookup(" 12345 ").unwrap().amount.cents(), 99_999);
        assert!(catalog.lookup("99999").is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog
            .insert("1", "Pen", Money::from_cents(100), "Office")
            .is_none());
        let previous = catalog.insert("1", "Pen Set", Money::from_cents(1299), "Office");
        assert_eq!(previous.unwrap().name, "Pen");
        assert_eq!(catalog.lookup("1").unwrap().name, "Pen Set");
    }
}
