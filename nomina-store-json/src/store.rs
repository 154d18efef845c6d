use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use nomina_core::models::{AttendanceRecord, Employee, PayrollRecord, RatesConfig};
use nomina_core::store::{PayrollStore, StoreError};

const EMPLOYEES_FILE: &str = "employees.json";
const ATTENDANCE_FILE: &str = "attendance.json";
const PAYROLL_FILE: &str = "payroll.json";
const CONFIG_FILE: &str = "payroll-config.json";

/// Tenant store over flat JSON files in `data_dir`.
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reads a whole collection file. A missing file is an empty
    /// collection; a file that exists but fails to parse is `Corrupt`.
    async fn read_collection<T: DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Vec<T>, StoreError> {
        let path = self.data_dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(format!("{}: {err}", path.display()))),
        };
        serde_json::from_slice(&bytes)
            .map_err(|err| StoreError::Corrupt(format!("{}: {err}", path.display())))
    }

    /// Rewrites a whole collection file. Last writer wins.
    async fn write_collection<T: Serialize>(
        &self,
        file: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        self.write_json(file, &items).await
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|err| StoreError::Io(format!("{}: {err}", self.data_dir.display())))?;
        let path = self.data_dir.join(file);
        let json = serde_json::to_vec_pretty(value)
            .map_err(|err| StoreError::Corrupt(format!("{}: {err}", path.display())))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|err| StoreError::Io(format!("{}: {err}", path.display())))
    }
}

#[async_trait]
impl PayrollStore for JsonStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.read_collection(EMPLOYEES_FILE).await
    }

    async fn get_employee(&self, id: &str) -> Result<Employee, StoreError> {
        self.list_employees()
            .await?
            .into_iter()
            .find(|employee| employee.id == id)
            .ok_or(StoreError::NotFound)
    }

    async fn upsert_employee(&self, employee: Employee) -> Result<(), StoreError> {
        let mut employees = self.list_employees().await?;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
        self.write_collection(EMPLOYEES_FILE, &employees).await
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.read_collection(ATTENDANCE_FILE).await
    }

    async fn load_rates(&self) -> Result<RatesConfig, StoreError> {
        let path = self.data_dir.join(CONFIG_FILE);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "no rate configuration, using defaults");
                return Ok(RatesConfig::default());
            }
            Err(err) => return Err(StoreError::Io(format!("{}: {err}", path.display()))),
        };
        match serde_json::from_slice::<RatesConfig>(&bytes) {
            Ok(config) => Ok(config.sanitized()),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "unreadable rate configuration, using defaults"
                );
                Ok(RatesConfig::default())
            }
        }
    }

    async fn save_rates(&self, config: &RatesConfig) -> Result<(), StoreError> {
        config
            .validate()
            .map_err(|err| StoreError::Configuration(err.to_string()))?;
        self.write_json(CONFIG_FILE, config).await
    }

    async fn list_payrolls(&self) -> Result<Vec<PayrollRecord>, StoreError> {
        self.read_collection(PAYROLL_FILE).await
    }

    async fn find_payroll(
        &self,
        employee_id: &str,
        period: &str,
    ) -> Result<Option<PayrollRecord>, StoreError> {
        Ok(self
            .list_payrolls()
            .await?
            .into_iter()
            .find(|record| record.employee_id == employee_id && record.period == period))
    }

    async fn insert_payroll(&self, record: PayrollRecord) -> Result<(), StoreError> {
        let mut records = self.list_payrolls().await?;
        records.push(record);
        self.write_collection(PAYROLL_FILE, &records).await
    }
}
