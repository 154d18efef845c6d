//! Fully loaded labor cost for one employee-month.
//!
//! Takes a base salary and derives what the employee actually costs the
//! company: the four employer social-security contributions, the four
//! benefit provisions, and the resulting hourly cost used as input to
//! quotations.
//!
//! | Component       | Formula                                        |
//! |-----------------|------------------------------------------------|
//! | social security | health + pension + occupational risk + fund    |
//! | benefits        | severance + interest + service bonus + vacation|
//! | total cost      | base salary + social security + benefits       |
//! | hourly cost     | total cost / monthly hours                     |
//!
//! Each contribution and provision is `base_salary * rate / 100` with rates
//! from the tenant [`RatesConfig`]. No rounding is applied.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use nomina_core::RatesConfig;
//! use nomina_core::calculations::LaborCostCalculator;
//!
//! let config = RatesConfig::default();
//! let details = LaborCostCalculator::new(&config).calculate(dec!(1423500));
//!
//! assert_eq!(details.social_security, dec!(356188.17));
//! assert_eq!(details.benefits, dec!(310750.05));
//! assert_eq!(details.total_cost, dec!(2090438.22));
//! assert_eq!(details.hourly_cost, dec!(8710.15925));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::percent_of;
use crate::models::{DEFAULT_MONTHLY_HOURS, RatesConfig};

/// Breakdown of the fully loaded cost of one employee-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCostDetails {
    pub base_salary: Decimal,
    pub social_security: Decimal,
    pub benefits: Decimal,
    pub total_cost: Decimal,
    pub hourly_cost: Decimal,
}

#[derive(Debug, Clone)]
pub struct LaborCostCalculator<'a> {
    config: &'a RatesConfig,
}

impl<'a> LaborCostCalculator<'a> {
    pub fn new(config: &'a RatesConfig) -> Self {
        Self { config }
    }

    /// Derives the employer cost breakdown for the given base salary.
    ///
    /// Infallible by design: a non-positive `monthly_hours` (possible only
    /// with an unsanitized configuration) falls back to the built-in
    /// default divisor rather than failing the calculation.
    pub fn calculate(&self, base_salary: Decimal) -> LaborCostDetails {
        let ss = &self.config.social_security;
        let health = percent_of(base_salary, ss.health);
        let pension = percent_of(base_salary, ss.pension);
        let occupational_risk = percent_of(base_salary, ss.occupational_risk);
        let compensation_fund = percent_of(base_salary, ss.compensation_fund);
        let social_security = health + pension + occupational_risk + compensation_fund;

        let bn = &self.config.benefits;
        let severance = percent_of(base_salary, bn.severance);
        let severance_interest = percent_of(base_salary, bn.severance_interest);
        let service_bonus = percent_of(base_salary, bn.service_bonus);
        let vacation = percent_of(base_salary, bn.vacation);
        let benefits = severance + severance_interest + service_bonus + vacation;

        let total_cost = base_salary + social_security + benefits;

        let monthly_hours = if self.config.monthly_hours > Decimal::ZERO {
            self.config.monthly_hours
        } else {
            DEFAULT_MONTHLY_HOURS
        };
        let hourly_cost = total_cost / monthly_hours;

        LaborCostDetails {
            base_salary,
            social_security,
            benefits,
            total_cost,
            hourly_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // default-rate breakdown
    // =========================================================================

    #[test]
    fn calculate_minimum_wage_2026_with_default_rates() {
        let config = RatesConfig::default();
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(1423500));

        // health 8.5% = 120997.50, pension 12% = 170820,
        // ARL 0.522% = 7430.67, fund 4% = 56940
        assert_eq!(details.social_security, dec!(356188.17));
        // severance 8.33% = 118577.55, interest 1% = 14235,
        // bonus 8.33% = 118577.55, vacation 4.17% = 59359.95
        assert_eq!(details.benefits, dec!(310750.05));
        assert_eq!(details.total_cost, dec!(2090438.22));
        assert_eq!(details.hourly_cost, dec!(8710.15925));
    }

    #[test]
    fn total_cost_is_sum_of_components() {
        let config = RatesConfig::default();
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(2500000));

        assert_eq!(
            details.total_cost,
            details.base_salary + details.social_security + details.benefits
        );
    }

    #[test]
    fn hourly_cost_is_total_over_monthly_hours() {
        let config = RatesConfig::default();
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(2400000));

        assert_eq!(details.hourly_cost, details.total_cost / dec!(240));
    }

    #[test]
    fn zero_salary_costs_nothing() {
        let config = RatesConfig::default();
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(0));

        assert_eq!(details.total_cost, dec!(0));
        assert_eq!(details.hourly_cost, dec!(0));
    }

    // =========================================================================
    // configuration-driven behavior
    // =========================================================================

    #[test]
    fn custom_monthly_hours_changes_hourly_cost() {
        let config = RatesConfig {
            monthly_hours: dec!(192),
            ..RatesConfig::default()
        };
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(1423500));

        assert_eq!(details.hourly_cost, dec!(2090438.22) / dec!(192));
    }

    #[test]
    fn zero_monthly_hours_falls_back_to_default_divisor() {
        let config = RatesConfig {
            monthly_hours: dec!(0),
            ..RatesConfig::default()
        };
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(1423500));

        assert_eq!(details.hourly_cost, details.total_cost / dec!(240));
    }

    #[test]
    fn custom_rates_drive_the_breakdown() {
        let mut config = RatesConfig::default();
        config.social_security = crate::models::SocialSecurityRates {
            health: dec!(10),
            pension: dec!(10),
            occupational_risk: dec!(0),
            compensation_fund: dec!(0),
        };
        let calculator = LaborCostCalculator::new(&config);

        let details = calculator.calculate(dec!(1000000));

        assert_eq!(details.social_security, dec!(200000));
    }
}
