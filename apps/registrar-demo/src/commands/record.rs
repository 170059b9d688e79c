//! # Record Commands
//!
//! Import, query and update records.
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  import_delimited ──┐                                                   │
//! │  import_mapping ────┼──► validated ──► registered ──► update_category   │
//! │  import_batch ──────┤        │                             │            │
//! │  import_from_catalog┘        ▼                             ▼            │
//! │                        rejected (ApiError)           clear_records      │
//! │                                                     (removes all)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use registrar_core::{CoreError, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::parse_record_id;
use crate::error::{ApiError, ErrorCode};
use crate::state::RegistryState;

/// Record DTO returned by every record command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    pub id: String,
    pub name: String,
    pub amount_cents: i64,
    /// Display form, e.g. "$65,000.00"
    pub amount: String,
    pub category: String,
    pub created_at: String,
}

impl From<&Record> for RecordDto {
    fn from(r: &Record) -> Self {
        RecordDto {
            id: r.id().to_string(),
            name: r.name().to_string(),
            amount_cents: r.amount().cents(),
            amount: r.amount().format_grouped(),
            category: r.category().to_string(),
            created_at: r.created_at().to_rfc3339(),
        }
    }
}

/// Logs a rejected input and converts the error.
fn reject(command: &'static str) -> impl FnOnce(CoreError) -> ApiError {
    move |err| {
        warn!(command, error = %err, "Input rejected");
        ApiError::from(err)
    }
}

/// Imports one `name<d>amount<d>category` line.
///
/// `delimiter` falls back to the configured one.
pub fn import_delimited(
    state: &RegistryState,
    text: &str,
    delimiter: Option<char>,
) -> Result<RecordDto, ApiError> {
    debug!(text, ?delimiter, "import_delimited command");

    let record = state
        .registry()
        .with_registry_mut(|r| match delimiter {
            Some(d) => r.from_delimited_string(text, d),
            None => r.from_delimited(text),
        })
        .map_err(reject("import_delimited"))?;

    info!(id = %record.id(), "Record imported from delimited text");
    Ok(RecordDto::from(&record))
}

/// Imports one JSON object with `name`, `amount` and `category`.
pub fn import_mapping(state: &RegistryState, json: &str) -> Result<RecordDto, ApiError> {
    debug!("import_mapping command");

    let value: Value = serde_json::from_str(json)?;
    let record = state
        .registry()
        .with_registry_mut(|r| r.register(&value))
        .map_err(reject("import_mapping"))?;

    info!(id = %record.id(), "Record imported from mapping");
    Ok(RecordDto::from(&record))
}

/// Imports a JSON array of objects. Either every item is registered or none.
pub fn import_batch(state: &RegistryState, json: &str) -> Result<Vec<RecordDto>, ApiError> {
    debug!("import_batch command");

    let items = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items,
        _ => {
            return Err(ApiError::new(
                ErrorCode::FormatError,
                "Batch import expects a JSON array",
            ))
        }
    };

    let records = state
        .registry()
        .with_registry_mut(|r| r.register_all(items.as_slice()))
        .map_err(reject("import_batch"))?;

    info!(count = records.len(), "Batch imported");
    Ok(records.iter().map(RecordDto::from).collect())
}

/// Imports the catalog entry registered under `code`.
pub fn import_from_catalog(state: &RegistryState, code: &str) -> Result<RecordDto, ApiError> {
    debug!(code, "import_from_catalog command");

    let catalog = state.catalog();
    let record = state
        .registry()
        .with_registry_mut(|r| r.from_catalog(code, catalog))
        .map_err(reject("import_from_catalog"))?;

    Ok(RecordDto::from(&record))
}

/// Changes the category of one record.
pub fn update_category(
    state: &RegistryState,
    id: &str,
    category: &str,
) -> Result<RecordDto, ApiError> {
    debug!(id, category, "update_category command");

    let id = parse_record_id(id)?;

    state
        .registry()
        .with_registry_mut(|r| r.update_category(id, category).map(RecordDto::from))
        .map_err(reject("update_category"))
}

/// One-line description of a record under the registry's company name.
pub fn describe_record(state: &RegistryState, id: &str) -> Result<String, ApiError> {
    debug!(id, "describe_record command");

    let id = parse_record_id(id)?;
    state
        .registry()
        .with_registry(|r| r.get(id).map(|record| r.describe(record)))
        .ok_or_else(|| CoreError::not_found("Record", id.to_string()).into())
}

/// All records, in registration order.
pub fn list_records(state: &RegistryState) -> Vec<RecordDto> {
    debug!("list_records command");
    state
        .registry()
        .with_registry(|r| r.records().iter().map(RecordDto::from).collect())
}

/// Records in `category`, in registration order.
pub fn list_by_category(state: &RegistryState, category: &str) -> Vec<RecordDto> {
    debug!(category, "list_by_category command");
    state.registry().with_registry(|r| {
        r.find_by_category(category)
            .into_iter()
            .map(RecordDto::from)
            .collect()
    })
}

/// Removes every record and returns how many were removed.
pub fn clear_records(state: &RegistryState) -> usize {
    let removed = state.registry().with_registry_mut(|r| {
        let count = r.count();
        r.clear();
        count
    });
    info!(removed, "Registry cleared");
    removed
}
