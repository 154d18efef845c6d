//! Per-employee pay statements.
//!
//! One calculator covers both ways a period can be paid:
//!
//! - [`PaySource::FixedSalary`] — the contractual monthly salary, the path
//!   used when generating persisted payroll records;
//! - [`PaySource::AttendanceHours`] — pay derived from check-in/check-out
//!   records, with regular hours capped per day and the remainder paid as
//!   overtime.
//!
//! Both paths share the same transport-subsidy eligibility rule and the
//! same employee-side deduction rates from [`RatesConfig`], so they cannot
//! silently diverge.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::attendance_hours::{REGULAR_HOURS_PER_DAY, WorkedHours};
use crate::calculations::common::percent_of;
use crate::models::{
    AttendanceRecord, DetailKind, Employee, PayPeriod, PayrollDetail, PayrollRecord, PayrollStatus,
    RatesConfig,
};

const DAYS_PER_MONTH: Decimal = dec!(30);

/// Where the pay for a period comes from.
#[derive(Debug, Clone, Copy)]
pub enum PaySource<'a> {
    FixedSalary,
    AttendanceHours { records: &'a [AttendanceRecord] },
}

/// The computed pay breakdown for one employee and period, before any
/// persistence. Summary fields are derived from `details` and feed the
/// period reports; `provisions` is the informational employer accrual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayStatement {
    pub employee_id: String,
    pub period: String,
    pub days_worked: Decimal,
    pub base_pay: Decimal,
    pub overtime_pay: Decimal,
    pub transport_subsidy: Decimal,
    pub gross_pay: Decimal,
    pub total_deductions: Decimal,
    pub provisions: Decimal,
    pub net_pay: Decimal,
    pub details: Vec<PayrollDetail>,
}

impl PayStatement {
    /// Freezes the statement into a persistable draft record.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> PayrollRecord {
        PayrollRecord {
            id,
            period: self.period,
            employee_id: self.employee_id,
            gross_salary: self.gross_pay,
            deductions: self.total_deductions,
            net_salary: self.net_pay,
            details: self.details,
            status: PayrollStatus::Draft,
            created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PayrollCalculator<'a> {
    config: &'a RatesConfig,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(config: &'a RatesConfig) -> Self {
        Self { config }
    }

    /// Computes the pay statement for one employee over `period`.
    pub fn statement(
        &self,
        employee: &Employee,
        period: &PayPeriod,
        source: PaySource<'_>,
    ) -> PayStatement {
        match source {
            PaySource::FixedSalary => self.fixed_salary(employee, period),
            PaySource::AttendanceHours { records } => {
                self.attendance_hours(employee, period, records)
            }
        }
    }

    fn fixed_salary(&self, employee: &Employee, period: &PayPeriod) -> PayStatement {
        let salary = employee.salary_amount;
        let mut details = Vec::new();

        details.push(PayrollDetail {
            concept: "Salario Básico".to_string(),
            kind: DetailKind::Earning,
            amount: salary,
        });

        let transport_subsidy = self.transport_subsidy(salary, &mut details);
        let total_deductions = self.employee_deductions(salary, &mut details);

        let gross_pay = salary + transport_subsidy;
        let net_pay = gross_pay - total_deductions;

        PayStatement {
            employee_id: employee.id.clone(),
            period: period.label(),
            days_worked: DAYS_PER_MONTH,
            base_pay: salary,
            overtime_pay: Decimal::ZERO,
            transport_subsidy,
            gross_pay,
            total_deductions,
            provisions: percent_of(salary, self.config.benefits.total()),
            net_pay,
            details,
        }
    }

    fn attendance_hours(
        &self,
        employee: &Employee,
        period: &PayPeriod,
        records: &[AttendanceRecord],
    ) -> PayStatement {
        let salary = employee.salary_amount;
        let worked = WorkedHours::tally(records, &employee.id, period);

        let daily_salary = salary / DAYS_PER_MONTH;
        let hourly_salary = daily_salary / REGULAR_HOURS_PER_DAY;
        let days_worked = worked.days_worked();
        let base_pay = daily_salary * days_worked;
        let overtime_pay =
            worked.overtime * hourly_salary * self.config.default_overtime_factor();

        let mut details = Vec::new();
        details.push(PayrollDetail {
            concept: "Salario Básico".to_string(),
            kind: DetailKind::Earning,
            amount: base_pay,
        });
        if overtime_pay > Decimal::ZERO {
            details.push(PayrollDetail {
                concept: "Horas Extra".to_string(),
                kind: DetailKind::Earning,
                amount: overtime_pay,
            });
        }

        // Eligibility keys off the contractual salary, same as the fixed
        // path; the subsidy itself is not prorated.
        let transport_subsidy = self.transport_subsidy(salary, &mut details);
        let total_deductions = self.employee_deductions(base_pay, &mut details);

        let gross_pay = base_pay + overtime_pay + transport_subsidy;
        let net_pay = gross_pay - total_deductions;

        PayStatement {
            employee_id: employee.id.clone(),
            period: period.label(),
            days_worked,
            base_pay,
            overtime_pay,
            transport_subsidy,
            gross_pay,
            total_deductions,
            provisions: percent_of(base_pay, self.config.benefits.total()),
            net_pay,
            details,
        }
    }

    /// Adds the transport subsidy earning when the salary qualifies.
    /// Ineligible employees get no line at all, not a zero line.
    fn transport_subsidy(&self, salary: Decimal, details: &mut Vec<PayrollDetail>) -> Decimal {
        if !self.config.transport_subsidy_eligible(salary) {
            return Decimal::ZERO;
        }
        let amount = self.config.transport_subsidy;
        details.push(PayrollDetail {
            concept: "Auxilio de Transporte".to_string(),
            kind: DetailKind::Earning,
            amount,
        });
        amount
    }

    /// Adds the employee-side health and pension deductions on `base`
    /// (the transport subsidy is never part of the deduction base).
    fn employee_deductions(&self, base: Decimal, details: &mut Vec<PayrollDetail>) -> Decimal {
        let rates = &self.config.employee;
        let health = percent_of(base, rates.health);
        let pension = percent_of(base, rates.pension);
        details.push(PayrollDetail {
            concept: format!("Aporte Salud ({}%)", rates.health),
            kind: DetailKind::Deduction,
            amount: health,
        });
        details.push(PayrollDetail {
            concept: format!("Aporte Pensión ({}%)", rates.pension),
            kind: DetailKind::Deduction,
            amount: pension,
        });
        health + pension
    }
}
