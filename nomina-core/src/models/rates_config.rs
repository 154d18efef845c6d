//! Tenant rate configuration.
//!
//! Every percentage the calculators use lives here, with built-in defaults
//! matching the Colombian statutory rates the system ships with. The
//! configuration is loaded once per request and passed by reference into the
//! calculators; it is never read lazily mid-calculation.
//!
//! Invariant: all rates are non-negative percentages and `monthly_hours` is
//! positive. `validate` enforces this on the write path; `sanitized` repairs
//! violations on the read path, logging each replacement.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_MONTHLY_HOURS: Decimal = dec!(240);
pub const DEFAULT_OVERTIME_FACTOR: Decimal = dec!(1.25);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatesConfigError {
    #[error("rate '{0}' must be non-negative")]
    NegativeRate(&'static str),

    #[error("monthlyHours must be positive")]
    NonPositiveMonthlyHours,
}

/// Employer-side social security contributions, each a percentage of base
/// salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialSecurityRates {
    pub health: Decimal,
    pub pension: Decimal,
    pub occupational_risk: Decimal,
    pub compensation_fund: Decimal,
}

impl Default for SocialSecurityRates {
    fn default() -> Self {
        Self {
            health: dec!(8.5),
            pension: dec!(12),
            occupational_risk: dec!(0.522),
            compensation_fund: dec!(4),
        }
    }
}

impl SocialSecurityRates {
    pub fn total(&self) -> Decimal {
        self.health + self.pension + self.occupational_risk + self.compensation_fund
    }
}

/// Employer-accrued benefit provisions (prestaciones sociales), each a
/// percentage of base salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenefitRates {
    pub severance: Decimal,
    pub severance_interest: Decimal,
    pub service_bonus: Decimal,
    pub vacation: Decimal,
}

impl Default for BenefitRates {
    fn default() -> Self {
        Self {
            severance: dec!(8.33),
            severance_interest: dec!(1),
            service_bonus: dec!(8.33),
            vacation: dec!(4.17),
        }
    }
}

impl BenefitRates {
    pub fn total(&self) -> Decimal {
        self.severance + self.severance_interest + self.service_bonus + self.vacation
    }
}

/// Employee-side payroll deductions. Both pay sources use these, so the two
/// payroll paths cannot diverge on deduction rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeRates {
    pub health: Decimal,
    pub pension: Decimal,
}

impl Default for EmployeeRates {
    fn default() -> Self {
        Self {
            health: dec!(4),
            pension: dec!(4),
        }
    }
}

impl EmployeeRates {
    pub fn total(&self) -> Decimal {
        self.health + self.pension
    }
}

/// A named overtime multiplier, e.g. daytime overtime at 1.25.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRate {
    pub id: String,
    pub name: String,
    pub factor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatesConfig {
    pub social_security: SocialSecurityRates,
    pub benefits: BenefitRates,
    pub employee: EmployeeRates,
    pub overhead_percent: Decimal,
    pub monthly_hours: Decimal,
    pub minimum_wage: Decimal,
    pub transport_subsidy: Decimal,
    pub extras: Vec<OvertimeRate>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            social_security: SocialSecurityRates::default(),
            benefits: BenefitRates::default(),
            employee: EmployeeRates::default(),
            overhead_percent: dec!(15),
            monthly_hours: DEFAULT_MONTHLY_HOURS,
            minimum_wage: dec!(1300000),
            transport_subsidy: dec!(162000),
            extras: vec![OvertimeRate {
                id: "extra1".to_string(),
                name: "Hora Extra Diurna".to_string(),
                factor: DEFAULT_OVERTIME_FACTOR,
            }],
        }
    }
}

impl RatesConfig {
    /// Statutory transport-subsidy eligibility: salary at or below two
    /// minimum wages. The boundary is inclusive.
    pub fn transport_subsidy_eligible(&self, salary: Decimal) -> bool {
        salary <= self.minimum_wage * dec!(2)
    }

    /// Multiplier for the given overtime kind, falling back to the built-in
    /// default when the kind is not configured.
    pub fn overtime_factor(&self, id: &str) -> Decimal {
        self.extras
            .iter()
            .find(|extra| extra.id == id)
            .map(|extra| extra.factor)
            .unwrap_or(DEFAULT_OVERTIME_FACTOR)
    }

    /// Factor applied to hours beyond the daily cap when no specific
    /// overtime kind is requested.
    pub fn default_overtime_factor(&self) -> Decimal {
        self.overtime_factor("extra1")
    }

    /// Reject configurations that violate the rate invariants. Used on the
    /// write path so bad values never reach the tenant store.
    pub fn validate(&self) -> Result<(), RatesConfigError> {
        let rates: [(&'static str, Decimal); 13] = [
            ("socialSecurity.health", self.social_security.health),
            ("socialSecurity.pension", self.social_security.pension),
            (
                "socialSecurity.occupationalRisk",
                self.social_security.occupational_risk,
            ),
            (
                "socialSecurity.compensationFund",
                self.social_security.compensation_fund,
            ),
            ("benefits.severance", self.benefits.severance),
            ("benefits.severanceInterest", self.benefits.severance_interest),
            ("benefits.serviceBonus", self.benefits.service_bonus),
            ("benefits.vacation", self.benefits.vacation),
            ("employee.health", self.employee.health),
            ("employee.pension", self.employee.pension),
            ("overheadPercent", self.overhead_percent),
            ("minimumWage", self.minimum_wage),
            ("transportSubsidy", self.transport_subsidy),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO {
                return Err(RatesConfigError::NegativeRate(name));
            }
        }
        for extra in &self.extras {
            if extra.factor < Decimal::ZERO {
                return Err(RatesConfigError::NegativeRate("extras.factor"));
            }
        }
        if self.monthly_hours <= Decimal::ZERO {
            return Err(RatesConfigError::NonPositiveMonthlyHours);
        }
        Ok(())
    }

    /// Repair invariant violations on the read path: each negative rate is
    /// replaced with its built-in default and logged. Calculations always
    /// get a usable configuration, never an error.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        sanitize(
            &mut self.social_security.health,
            defaults.social_security.health,
            "socialSecurity.health",
        );
        sanitize(
            &mut self.social_security.pension,
            defaults.social_security.pension,
            "socialSecurity.pension",
        );
        sanitize(
            &mut self.social_security.occupational_risk,
            defaults.social_security.occupational_risk,
            "socialSecurity.occupationalRisk",
        );
        sanitize(
            &mut self.social_security.compensation_fund,
            defaults.social_security.compensation_fund,
            "socialSecurity.compensationFund",
        );
        sanitize(
            &mut self.benefits.severance,
            defaults.benefits.severance,
            "benefits.severance",
        );
        sanitize(
            &mut self.benefits.severance_interest,
            defaults.benefits.severance_interest,
            "benefits.severanceInterest",
        );
        sanitize(
            &mut self.benefits.service_bonus,
            defaults.benefits.service_bonus,
            "benefits.serviceBonus",
        );
        sanitize(
            &mut self.benefits.vacation,
            defaults.benefits.vacation,
            "benefits.vacation",
        );
        sanitize(&mut self.employee.health, defaults.employee.health, "employee.health");
        sanitize(
            &mut self.employee.pension,
            defaults.employee.pension,
            "employee.pension",
        );
        sanitize(
            &mut self.overhead_percent,
            defaults.overhead_percent,
            "overheadPercent",
        );
        sanitize(&mut self.minimum_wage, defaults.minimum_wage, "minimumWage");
        sanitize(
            &mut self.transport_subsidy,
            defaults.transport_subsidy,
            "transportSubsidy",
        );
        if self.monthly_hours <= Decimal::ZERO {
            warn!(
                value = %self.monthly_hours,
                "monthlyHours must be positive, using default"
            );
            self.monthly_hours = DEFAULT_MONTHLY_HOURS;
        }
        for extra in &mut self.extras {
            if extra.factor < Decimal::ZERO {
                warn!(id = %extra.id, "negative overtime factor, using default");
                extra.factor = DEFAULT_OVERTIME_FACTOR;
            }
        }
        self
    }
}

fn sanitize(value: &mut Decimal, default: Decimal, name: &'static str) {
    if *value < Decimal::ZERO {
        warn!(rate = name, value = %value, "negative rate in configuration, using default");
        *value = default;
    }
}
