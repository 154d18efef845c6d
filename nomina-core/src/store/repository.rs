use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AttendanceRecord, Employee, PayrollRecord, RatesConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("corrupt data file: {0}")]
    Corrupt(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Access to one tenant's payroll data. Backends decide how the data is
/// laid out on disk; callers only see the collections below.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    // Employee roster (owned by the HR module, read-mostly here)
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
    async fn get_employee(&self, id: &str) -> Result<Employee, StoreError>;
    async fn upsert_employee(&self, employee: Employee) -> Result<(), StoreError>;

    // Attendance check-ins (owned by the shifts module)
    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError>;

    // Tenant rate configuration. Implementations must return usable rates
    // even when the stored configuration is missing or corrupt.
    async fn load_rates(&self) -> Result<RatesConfig, StoreError>;
    async fn save_rates(&self, config: &RatesConfig) -> Result<(), StoreError>;

    // Payroll records, keyed by (employee, period)
    async fn list_payrolls(&self) -> Result<Vec<PayrollRecord>, StoreError>;
    async fn find_payroll(
        &self,
        employee_id: &str,
        period: &str,
    ) -> Result<Option<PayrollRecord>, StoreError>;
    async fn insert_payroll(&self, record: PayrollRecord) -> Result<(), StoreError>;
}
