use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailKind {
    Earning,
    Deduction,
}

/// One line item on a payroll record, e.g. "Salario Básico" or
/// "Aporte Salud (4%)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollDetail {
    pub concept: String,
    #[serde(rename = "type")]
    pub kind: DetailKind,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    Draft,
    Paid,
}

/// A persisted payroll record for one (employee, period) pair. Immutable
/// once created; the store keeps at most one per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub id: String,
    pub period: String,
    pub employee_id: String,
    pub gross_salary: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
    pub details: Vec<PayrollDetail>,
    pub status: PayrollStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn detail_kind_serializes_screaming_snake() {
        let detail = PayrollDetail {
            concept: "Salario Básico".to_string(),
            kind: DetailKind::Earning,
            amount: dec!(1300000),
        };

        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["type"], "EARNING");
        assert_eq!(json["concept"], "Salario Básico");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = PayrollRecord {
            id: "r1".to_string(),
            period: "2026-03-full".to_string(),
            employee_id: "e1".to_string(),
            gross_salary: dec!(1462000),
            deductions: dec!(104000),
            net_salary: dec!(1358000),
            details: vec![PayrollDetail {
                concept: "Aporte Pensión (4%)".to_string(),
                kind: DetailKind::Deduction,
                amount: dec!(52000),
            }],
            status: PayrollStatus::Draft,
            created_at: "2026-03-16T08:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: PayrollRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
        assert!(json.contains("\"status\":\"DRAFT\""));
        assert!(json.contains("\"employeeId\":\"e1\""));
    }
}
