//! Effective tax rate.
//!
//! The marginal rate lives next to the evaluator in
//! [`brackets`](crate::calculations::brackets) because it reads the same
//! segment lookup.

use rust_decimal::Decimal;

/// `final_tax / income`, or zero when `income` is zero or negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::effective_rate;
///
/// assert_eq!(effective_rate(dec!(9690), dec!(75000)), dec!(0.1292));
/// assert_eq!(effective_rate(dec!(9690), dec!(0)), dec!(0));
/// ```
pub fn effective_rate(
    final_tax: Decimal,
    income: Decimal,
) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    final_tax / income
}
