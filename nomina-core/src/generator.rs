//! Store-backed payroll generation.
//!
//! The generator owns the at-most-once guarantee: records are keyed by
//! `(employee, period)`, and a request for a pair that already has a record
//! returns [`GenerateOutcome::AlreadyExists`] with the stored record instead
//! of appending a duplicate. Callers never need to check for existence
//! themselves.

use chrono::Utc;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::calculations::{PaySource, PayrollCalculator};
use crate::models::{PayPeriod, PayrollRecord, RatesConfig};
use crate::store::{PayrollStore, StoreError};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("employee '{0}' not found")]
    EmployeeNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a single generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A new record was computed and persisted.
    Generated(PayrollRecord),
    /// A record for this (employee, period) already existed; nothing was
    /// written.
    AlreadyExists(PayrollRecord),
}

impl GenerateOutcome {
    pub fn into_record(self) -> PayrollRecord {
        match self {
            Self::Generated(record) | Self::AlreadyExists(record) => record,
        }
    }
}

pub struct PayrollGenerator<'a> {
    store: &'a dyn PayrollStore,
    config: &'a RatesConfig,
}

impl<'a> PayrollGenerator<'a> {
    pub fn new(store: &'a dyn PayrollStore, config: &'a RatesConfig) -> Self {
        Self { store, config }
    }

    /// Generates (or retrieves) the payroll record for one employee.
    ///
    /// # Errors
    ///
    /// * [`GenerateError::EmployeeNotFound`] — no such employee in the
    ///   roster.
    /// * [`GenerateError::Store`] — the tenant store failed.
    pub async fn generate(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> Result<GenerateOutcome, GenerateError> {
        let label = period.label();
        if let Some(existing) = self.store.find_payroll(employee_id, &label).await? {
            return Ok(GenerateOutcome::AlreadyExists(existing));
        }

        let employee = match self.store.get_employee(employee_id).await {
            Ok(employee) => employee,
            Err(StoreError::NotFound) => {
                return Err(GenerateError::EmployeeNotFound(employee_id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let statement = PayrollCalculator::new(self.config).statement(
            &employee,
            period,
            PaySource::FixedSalary,
        );
        let record = statement.into_record(Uuid::new_v4().to_string(), Utc::now());
        self.store.insert_payroll(record.clone()).await?;
        Ok(GenerateOutcome::Generated(record))
    }

    /// Generates payroll for the whole roster.
    ///
    /// Per-employee failures are logged and skipped so one bad roster entry
    /// never blocks the batch; the returned records cover every employee
    /// that succeeded, whether freshly generated or already present.
    pub async fn generate_all(
        &self,
        period: &PayPeriod,
    ) -> Result<Vec<PayrollRecord>, GenerateError> {
        let employees = self.store.list_employees().await?;
        let mut records = Vec::with_capacity(employees.len());
        for employee in employees {
            match self.generate(&employee.id, period).await {
                Ok(outcome) => records.push(outcome.into_record()),
                Err(err) => {
                    warn!(
                        employee = %employee.full_name(),
                        error = %err,
                        "skipping employee in batch payroll generation"
                    );
                }
            }
        }
        Ok(records)
    }
}
