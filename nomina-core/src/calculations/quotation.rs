//! Cost-plus-margin quotation.
//!
//! Prices a job from labor hours, an hourly cost, material costs and a
//! desired margin. The margin is a fraction of the *sell price*, not a
//! markup on cost, which gives the sell price the algebraic form
//! `total_cost / ((100 - margin) / 100)`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use nomina_core::RatesConfig;
//! use nomina_core::calculations::{QuotationCalculator, QuotationInput};
//!
//! let config = RatesConfig::default(); // 15% overhead
//! let result = QuotationCalculator::new(&config)
//!     .calculate(&QuotationInput {
//!         hours: dec!(10),
//!         base_hourly_cost: dec!(20000),
//!         material_costs: dec!(50000),
//!         desired_margin: dec!(20),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.direct_labor_cost, dec!(200000));
//! assert_eq!(result.total_cost, dec!(287500));
//! assert_eq!(result.sell_price, dec!(359375));
//! assert_eq!(result.profit, dec!(71875));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::percent_of;
use crate::models::RatesConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuotationError {
    /// A margin of 100% or more would make the sell price infinite or
    /// negative; negative margins are equally meaningless.
    #[error("desired margin must be in [0, 100), got {0}")]
    MarginOutOfRange(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationInput {
    pub hours: Decimal,
    pub base_hourly_cost: Decimal,
    pub material_costs: Decimal,
    pub desired_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationResult {
    pub direct_labor_cost: Decimal,
    pub material_costs: Decimal,
    pub overhead_amount: Decimal,
    pub total_cost: Decimal,
    pub sell_price: Decimal,
    pub profit: Decimal,
    pub margin_percentage: Decimal,
}

#[derive(Debug, Clone)]
pub struct QuotationCalculator<'a> {
    config: &'a RatesConfig,
}

impl<'a> QuotationCalculator<'a> {
    pub fn new(config: &'a RatesConfig) -> Self {
        Self { config }
    }

    /// Derives the sell price for the given inputs, applying the tenant's
    /// overhead percentage on top of direct costs.
    ///
    /// # Errors
    ///
    /// Returns [`QuotationError::MarginOutOfRange`] when `desired_margin`
    /// is negative or at/above 100.
    pub fn calculate(&self, input: &QuotationInput) -> Result<QuotationResult, QuotationError> {
        if input.desired_margin < Decimal::ZERO || input.desired_margin >= Decimal::ONE_HUNDRED {
            return Err(QuotationError::MarginOutOfRange(input.desired_margin));
        }

        let direct_labor_cost = input.hours * input.base_hourly_cost;
        let subtotal = direct_labor_cost + input.material_costs;
        let overhead_amount = percent_of(subtotal, self.config.overhead_percent);
        let total_cost = subtotal + overhead_amount;

        // Margin on price: cost / (1 - margin), not cost * (1 + margin).
        let margin_factor = (Decimal::ONE_HUNDRED - input.desired_margin) / Decimal::ONE_HUNDRED;
        let sell_price = total_cost / margin_factor;
        let profit = sell_price - total_cost;

        Ok(QuotationResult {
            direct_labor_cost,
            material_costs: input.material_costs,
            overhead_amount,
            total_cost,
            sell_price,
            profit,
            margin_percentage: input.desired_margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input() -> QuotationInput {
        QuotationInput {
            hours: dec!(10),
            base_hourly_cost: dec!(20000),
            material_costs: dec!(50000),
            desired_margin: dec!(20),
        }
    }

    // =========================================================================
    // reference quotation
    // =========================================================================

    #[test]
    fn calculate_reference_quotation() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);

        let result = calculator.calculate(&input()).unwrap();

        assert_eq!(result.direct_labor_cost, dec!(200000));
        assert_eq!(result.material_costs, dec!(50000));
        assert_eq!(result.overhead_amount, dec!(37500));
        assert_eq!(result.total_cost, dec!(287500));
        assert_eq!(result.sell_price, dec!(359375));
        assert_eq!(result.profit, dec!(71875));
        assert_eq!(result.margin_percentage, dec!(20));
    }

    #[test]
    fn zero_margin_sells_at_cost() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);
        let mut quote = input();
        quote.desired_margin = dec!(0);

        let result = calculator.calculate(&quote).unwrap();

        assert_eq!(result.sell_price, result.total_cost);
        assert_eq!(result.profit, dec!(0));
    }

    #[test]
    fn fifty_percent_margin_doubles_cost() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);
        let mut quote = input();
        quote.desired_margin = dec!(50);

        let result = calculator.calculate(&quote).unwrap();

        assert_eq!(result.sell_price, result.total_cost * dec!(2));
        assert_eq!(result.profit, result.total_cost);
    }

    // =========================================================================
    // margin-on-price property: profit / sell_price == margin / 100
    // =========================================================================

    #[test]
    fn profit_over_sell_price_matches_requested_margin() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);

        for margin in [dec!(0), dec!(10), dec!(20), dec!(33), dec!(50), dec!(99)] {
            let mut quote = input();
            quote.desired_margin = margin;

            let result = calculator.calculate(&quote).unwrap();

            let achieved = (result.profit / result.sell_price * dec!(100)).round_dp(6);
            assert_eq!(achieved, margin, "margin {margin} not achieved");
        }
    }

    // =========================================================================
    // configuration and validation
    // =========================================================================

    #[test]
    fn overhead_comes_from_configuration() {
        let config = RatesConfig {
            overhead_percent: dec!(0),
            ..RatesConfig::default()
        };
        let calculator = QuotationCalculator::new(&config);

        let result = calculator.calculate(&input()).unwrap();

        assert_eq!(result.overhead_amount, dec!(0));
        assert_eq!(result.total_cost, dec!(250000));
    }

    #[test]
    fn margin_of_100_is_rejected() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);
        let mut quote = input();
        quote.desired_margin = dec!(100);

        let result = calculator.calculate(&quote);

        assert_eq!(result, Err(QuotationError::MarginOutOfRange(dec!(100))));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);
        let mut quote = input();
        quote.desired_margin = dec!(-5);

        let result = calculator.calculate(&quote);

        assert_eq!(result, Err(QuotationError::MarginOutOfRange(dec!(-5))));
    }

    #[test]
    fn materials_only_quotation() {
        let config = RatesConfig::default();
        let calculator = QuotationCalculator::new(&config);
        let quote = QuotationInput {
            hours: dec!(0),
            base_hourly_cost: dec!(0),
            material_costs: dec!(100000),
            desired_margin: dec!(20),
        };

        let result = calculator.calculate(&quote).unwrap();

        assert_eq!(result.direct_labor_cost, dec!(0));
        assert_eq!(result.total_cost, dec!(115000));
        assert_eq!(result.sell_price, dec!(143750));
    }
}
