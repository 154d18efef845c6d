use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use nomina_core::models::Employee;
use nomina_core::store::PayrollStore;

/// Errors that can occur when parsing an employee roster.
#[derive(Debug, Error)]
pub enum RosterLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

impl From<csv::Error> for RosterLoaderError {
    fn from(err: csv::Error) -> Self {
        RosterLoaderError::CsvParse(err.to_string())
    }
}

/// A single row from the roster CSV file.
///
/// Expected columns:
/// - `id`: stable employee id (empty to have one assigned)
/// - `first_name`, `last_name`, `identification`
/// - `salary_amount`: monthly salary in pesos
/// - `contract_type`: e.g. `Indefinido`, `Fijo`
/// - `is_active`: `true`/`false`, defaults to `true`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterRecord {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub identification: String,
    pub salary_amount: Decimal,
    pub contract_type: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Loader for employee roster CSV files.
///
/// Loading goes through the `PayrollStore` trait, so it works with any
/// store backend. Inserts are upserts keyed by employee id, which makes
/// re-running the same load idempotent.
pub struct RosterLoader;

impl RosterLoader {
    /// Parse roster records from a CSV reader.
    ///
    /// # Errors
    ///
    /// Returns [`RosterLoaderError::CsvParse`] for malformed CSV and
    /// [`RosterLoaderError::InvalidRecord`] for rows that parse but
    /// violate roster invariants (negative salary, blank names).
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RosterRecord>, RosterLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row = index + 2; // header is row 1
            let record: RosterRecord = result?;
            if record.salary_amount < Decimal::ZERO {
                return Err(RosterLoaderError::InvalidRecord {
                    row,
                    reason: format!("negative salary {}", record.salary_amount),
                });
            }
            if record.first_name.trim().is_empty() || record.last_name.trim().is_empty() {
                return Err(RosterLoaderError::InvalidRecord {
                    row,
                    reason: "blank employee name".to_string(),
                });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Load roster records into the tenant store, returning how many
    /// employees were written.
    ///
    /// A row that fails to persist is logged and skipped so one bad row
    /// never aborts the import; callers compare the returned count with
    /// the parsed count to see whether anything was dropped.
    pub async fn load<S: PayrollStore + ?Sized>(store: &S, records: &[RosterRecord]) -> usize {
        let mut written = 0;
        for record in records {
            let employee = Employee {
                id: record
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
                identification: record.identification.clone(),
                salary_amount: record.salary_amount,
                contract_type: record.contract_type.clone(),
                is_active: record.is_active,
            };
            let name = employee.full_name();
            if let Err(err) = store.upsert_employee(employee).await {
                warn!(
                    employee = %name,
                    error = %err,
                    "skipping roster row that failed to persist"
                );
                continue;
            }
            written += 1;
        }
        written
    }
}
