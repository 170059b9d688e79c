//! # Pricing Commands
//!
//! Rate configuration, adjusted prices and registry aggregates.
//!
//! Adjusted prices are computed on every call from the current rate; nothing
//! here caches a result.

use registrar_core::pricing::{annual_bonus, calculate_discount, PerformanceRating};
use registrar_core::{CoreError, Money, Rate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::parse_record_id;
use crate::error::{ApiError, ErrorCode};
use crate::state::RegistryState;

/// Aggregate view of the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub count: usize,
    pub total_cents: i64,
    pub total: String,
    pub average_cents: i64,
    pub average: String,
    pub rate_bps: u32,
}

/// A base amount and what it becomes after an adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_cents: i64,
    pub adjusted_cents: i64,
    pub base: String,
    pub adjusted: String,
}

impl PriceQuote {
    fn new(base: Money, adjusted: Money) -> Self {
        PriceQuote {
            base_cents: base.cents(),
            adjusted_cents: adjusted.cents(),
            base: base.format_grouped(),
            adjusted: adjusted.format_grouped(),
        }
    }
}

fn parse_money(raw: &str) -> Result<Money, ApiError> {
    raw.trim()
        .parse::<Money>()
        .map_err(|e| CoreError::format(raw, e.to_string()).into())
}

// =============================================================================
// Commands
// =============================================================================

/// Count, total, average and the current rate.
pub fn get_summary(state: &RegistryState) -> Result<RegistrySummary, ApiError> {
    debug!("get_summary command");
    state.registry().with_registry(|r| -> Result<RegistrySummary, ApiError> {
        let total = r.total_amount()?;
        let average = r.average_amount();
        Ok(RegistrySummary {
            count: r.count(),
            total_cents: total.cents(),
            total: total.format_grouped(),
            average_cents: average.cents(),
            average: average.format_grouped(),
            rate_bps: r.rate().bps(),
        })
    })
}

/// Sets the shared rate from a percentage. `None` leaves it unchanged.
///
/// Negative, non-finite and above-100 percentages are rejected. Returns the
/// rate in force afterwards, in basis points.
pub fn configure_rate(state: &RegistryState, percent: Option<f64>) -> Result<u32, ApiError> {
    debug!(?percent, "configure_rate command");

    let rate = match percent {
        Some(p) if p.is_finite() && p >= 0.0 => Some(Rate::from_percentage(p)),
        Some(p) => {
            return Err(ApiError::new(
                ErrorCode::ValidationError,
                format!("Rate must be a non-negative number, got {}", p),
            ))
        }
        None => None,
    };

    let bps = state.registry().with_registry_mut(|r| {
        r.configure(rate)?;
        Ok::<_, CoreError>(r.rate().bps())
    })?;

    info!(rate_bps = bps, "Rate configured");
    Ok(bps)
}

/// Applies the current rate to a decimal amount such as "100" or "19.99".
pub fn price_with_adjustment(state: &RegistryState, base: &str) -> Result<PriceQuote, ApiError> {
    debug!(base, "price_with_adjustment command");

    let base = parse_money(base)?;
    let adjusted = state
        .registry()
        .with_registry(|r| r.price_with_adjustment(base))?;
    Ok(PriceQuote::new(base, adjusted))
}

/// Applies the current rate to a registered record's amount.
pub fn adjusted_record_amount(state: &RegistryState, id: &str) -> Result<PriceQuote, ApiError> {
    debug!(id, "adjusted_record_amount command");

    let id = parse_record_id(id)?;
    state.registry().with_registry(|r| -> Result<PriceQuote, ApiError> {
        let record = r
            .get(id)
            .ok_or_else(|| CoreError::not_found("Record", id.to_string()))?;
        Ok(PriceQuote::new(record.amount(), r.adjusted_amount(record)?))
    })
}

/// Discounted price. Percentages above 100 are treated as 100.
pub fn quote_discount(price: &str, percent: u32) -> Result<PriceQuote, ApiError> {
    debug!(price, percent, "quote_discount command");

    let base = parse_money(price)?;
    Ok(PriceQuote::new(base, calculate_discount(base, percent)))
}

/// Annual bonus for a registered record at `rating`.
pub fn quote_bonus(state: &RegistryState, id: &str, rating: u8) -> Result<PriceQuote, ApiError> {
    debug!(id, rating, "quote_bonus command");

    let id = parse_record_id(id)?;
    let amount = state
        .registry()
        .with_registry(|r| r.get(id).map(|record| record.amount()))
        .ok_or_else(|| CoreError::not_found("Record", id.to_string()))?;

    Ok(PriceQuote::new(
        amount,
        annual_bonus(amount, PerformanceRating::new(rating)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::record::import_delimited;
    use crate::state::ConfigState;
    use registrar_core::Catalog;
    use uuid::Uuid;

    fn state() -> RegistryState {
        RegistryState::new(&ConfigState::default(), Catalog::sample()).unwrap()
    }

    #[test]
    fn test_summary_of_empty_registry() {
        let summary = get_summary(&state()).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_cents, 0);
        assert_eq!(summary.rate_bps, 800);
    }

    #[test]
    fn test_summary_after_imports() {
        let state = state();
        import_delimited(&state, "Alice-75000-Engineering", None).unwrap();
        import_delimited(&state, "Bob-65000-Sales", None).unwrap();

        let summary = get_summary(&state).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, "$140,000.00");
        assert_eq!(summary.average, "$70,000.00");
    }

    #[test]
    fn test_price_follows_rate_changes() {
        let state = state();
        let quote = price_with_adjustment(&state, "100").unwrap();
        assert_eq!(quote.adjusted, "$108.00");

        assert_eq!(configure_rate(&state, Some(10.0)).unwrap(), 1000);
        let quote = price_with_adjustment(&state, "100").unwrap();
        assert_eq!(quote.adjusted_cents, 11_000);

        assert_eq!(configure_rate(&state, None).unwrap(), 1000);
    }

    #[test]
    fn test_configure_rate_rejects_bad_values() {
        let state = state();
        let err = configure_rate(&state, Some(250.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = configure_rate(&state, Some(f64::NAN)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = configure_rate(&state, Some(-5.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(get_summary(&state).unwrap().rate_bps, 800);
        assert_eq!(configure_rate(&state, Some(0.0)).unwrap(), 0);
    }

    #[test]
    fn test_price_of_largest_amount_reports_overflow() {
        let state = state();
        let err = price_with_adjustment(&state, "92233720368547758.07").unwrap_err();
        assert_eq!(err.code, ErrorCode::Overflow);

        configure_rate(&state, Some(0.0)).unwrap();
        let quote = price_with_adjustment(&state, "92233720368547758.07").unwrap();
        assert_eq!(quote.adjusted_cents, i64::MAX);
    }

    #[test]
    fn test_summary_reports_total_overflow() {
        let config = ConfigState {
            max_amount: Money::from_cents(i64::MAX),
            ..ConfigState::default()
        };
        let state = RegistryState::new(&config, Catalog::sample()).unwrap();
        import_delimited(&state, "A-90000000000000000-Ops", None).unwrap();
        import_delimited(&state, "B-90000000000000000-Ops", None).unwrap();

        let err = get_summary(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::Overflow);
    }

    #[test]
    fn test_price_rejects_unparseable_amount() {
        let err = price_with_adjustment(&state(), "ten dollars").unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
    }

    #[test]
    fn test_adjusted_record_amount() {
        let state = state();
        let dto = import_delimited(&state, "Alice-75000-Engineering", None).unwrap();
        let quote = adjusted_record_amount(&state, &dto.id).unwrap();
        assert_eq!(quote.adjusted_cents, 8_100_000);

        let err = adjusted_record_amount(&state, &Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_discount_and_bonus() {
        let quote = quote_discount("100", 20).unwrap();
        assert_eq!(quote.adjusted_cents, 8_000);

        let state = state();
        let dto = import_delimited(&state, "Alice-75000-Engineering", None).unwrap();
        let quote = quote_bonus(&state, &dto.id, 4).unwrap();
        assert_eq!(quote.adjusted, "$11,250.00");
    }
}
