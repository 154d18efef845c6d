//! Shared helpers for the payroll and finance calculations.

use rust_decimal::Decimal;

/// Applies a percentage rate to an amount: `amount * rate / 100`.
///
/// No rounding is applied; callers round at display edges only.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use nomina_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(1300000), dec!(4)), dec!(52000));
/// assert_eq!(percent_of(dec!(1423500), dec!(0.522)), dec!(7430.67));
/// ```
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}
