//! Non-refundable credit application.

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;

/// Subtracts a non-refundable `credit` from `tax`, never going below zero.
///
/// `credit` is a single pre-computed amount in tax dollars; translating
/// named credits (age, pension, basic personal amount) into it is the
/// caller's job.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::apply_credit;
///
/// assert_eq!(apply_credit(dec!(11690), dec!(2000)), dec!(9690));
/// assert_eq!(apply_credit(dec!(11690), dec!(20000)), dec!(0));
/// ```
pub fn apply_credit(
    tax: Decimal,
    credit: Decimal,
) -> Decimal {
    non_negative(tax - credit)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn credit_below_tax_is_subtracted() {
        assert_eq!(apply_credit(dec!(11690), dec!(2000)), dec!(9690));
    }

    #[test]
    fn credit_above_tax_floors_at_zero() {
        assert_eq!(apply_credit(dec!(11690), dec!(20000)), Decimal::ZERO);
    }

    #[test]
    fn credit_equal_to_tax_gives_zero() {
        assert_eq!(apply_credit(dec!(2355.75), dec!(2355.75)), Decimal::ZERO);
    }

    #[test]
    fn zero_credit_is_identity() {
        assert_eq!(apply_credit(dec!(500.10), Decimal::ZERO), dec!(500.10));
    }

    proptest! {
        #[test]
        fn prop_credit_result_is_never_negative(
            tax_cents in 0i64..1_000_000_000,
            credit_cents in 0i64..1_000_000_000,
        ) {
            let tax = Decimal::new(tax_cents, 2);
            let credit = Decimal::new(credit_cents, 2);

            let result = apply_credit(tax, credit);

            prop_assert!(result >= Decimal::ZERO);
            if credit <= tax {
                prop_assert_eq!(result, tax - credit);
            }
        }
    }
}
