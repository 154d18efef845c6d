use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One check-in/check-out pair recorded by the attendance module.
/// `check_out` is absent while the shift is still open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub check_in: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
}
