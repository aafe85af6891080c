//! Dividend gross-up and federal dividend tax credit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::TaxYearConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividendKind {
    /// Paid out of income taxed at the general corporate rate.
    Eligible,
    /// Paid out of income taxed at the small-business rate.
    NonEligible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendTaxCredit {
    /// Amount included in income.
    pub grossed_up_amount: Decimal,
    /// Federal non-refundable credit on the grossed-up amount.
    pub federal_credit: Decimal,
}

/// Grosses up a cash dividend and computes its federal credit.
///
/// The credit is a non-refundable amount in tax dollars, suitable for
/// [`apply_credit`](crate::calculations::apply_credit).
///
/// # Arguments
///
/// * `cash_dividend` - Dividend actually received; negative is treated as zero
/// * `kind` - Eligible or non-eligible, which picks the gross-up and rate
/// * `config` - The year's gross-up factors and credit rates
///
/// # Returns
///
/// The grossed-up amount to include in income and the federal credit, both
/// rounded to cents.
///
/// # Examples
///
/// ```
/// # use rust_decimal_macros::dec;
/// # use tax_core::TaxYearConfig;
/// # let config = TaxYearConfig {
/// #     tax_year: 2024,
/// #     quebec_abatement_rate: dec!(0.165),
/// #     cpp_rate: dec!(0.0595),
/// #     qpp_rate: dec!(0.064),
/// #     ympe: dec!(68500),
/// #     cpp_basic_exemption: dec!(3500),
/// #     ei_rate: dec!(0.0166),
/// #     ei_rate_quebec: dec!(0.0132),
/// #     ei_max_insurable_earnings: dec!(63200),
/// #     qpip_rate: dec!(0.00494),
/// #     qpip_max_insurable_earnings: dec!(94000),
/// #     oas_recovery_threshold: dec!(90997),
/// #     oas_recovery_rate: dec!(0.15),
/// #     eligible_dividend_gross_up: dec!(0.38),
/// #     eligible_dividend_credit_rate: dec!(0.150198),
/// #     non_eligible_dividend_gross_up: dec!(0.15),
/// #     non_eligible_dividend_credit_rate: dec!(0.090301),
/// #     rrsp_dollar_limit: dec!(31560),
/// #     rrsp_earned_income_rate: dec!(0.18),
/// #     tfsa_annual_limit: dec!(7000),
/// #     cesg_rate: dec!(0.20),
/// #     cesg_contribution_cap: dec!(2500),
/// # };
/// use tax_core::calculations::{DividendKind, dividend_tax_credit};
///
/// let eligible = dividend_tax_credit(dec!(1000), DividendKind::Eligible, &config);
/// assert_eq!(eligible.grossed_up_amount, dec!(1380.00));
/// assert_eq!(eligible.federal_credit, dec!(207.27));
///
/// let non_eligible = dividend_tax_credit(dec!(1000), DividendKind::NonEligible, &config);
/// assert_eq!(non_eligible.federal_credit, dec!(103.85));
/// ```
pub fn dividend_tax_credit(
    cash_dividend: Decimal,
    kind: DividendKind,
    config: &TaxYearConfig,
) -> DividendTaxCredit {
    let (gross_up, credit_rate) = match kind {
        DividendKind::Eligible => (
            config.eligible_dividend_gross_up,
            config.eligible_dividend_credit_rate,
        ),
        DividendKind::NonEligible => (
            config.non_eligible_dividend_gross_up,
            config.non_eligible_dividend_credit_rate,
        ),
    };

    let grossed_up_amount = round_half_up(non_negative(cash_dividend) * (Decimal::ONE + gross_up));
    DividendTaxCredit {
        grossed_up_amount,
        federal_credit: round_half_up(grossed_up_amount * credit_rate),
    }
}
