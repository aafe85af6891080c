//! Old Age Security recovery tax ("clawback").
//!
//! OAS is recovered at a flat rate on net income above a yearly threshold,
//! up to the full benefit received. The recovery is a two-segment bracket
//! schedule, so it is evaluated with the same engine as income tax.

use rust_decimal::Decimal;

use crate::calculations::brackets::evaluate_tax;
use crate::calculations::common::non_negative;
use crate::models::{BracketSegment, IndexedBracketTable, Jurisdiction, TaxYearConfig};

/// Recovery schedule for `config`'s year: nothing up to the threshold,
/// the recovery rate above it.
///
/// The schedule is never indexed, so its inflation factor is one and it
/// carries no base credit.
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
/// use tax_core::calculations::{evaluate_tax, oas_recovery_schedule};
///
/// let schedule = oas_recovery_schedule(&config);
/// assert_eq!(schedule.segments.len(), 2);
/// assert_eq!(evaluate_tax(&schedule, dec!(90997)), dec!(0));
/// assert_eq!(evaluate_tax(&schedule, dec!(100000)), dec!(1350.45));
/// ```
pub fn oas_recovery_schedule(config: &TaxYearConfig) -> IndexedBracketTable {
    IndexedBracketTable {
        jurisdiction: Jurisdiction::Federal,
        tax_year: config.tax_year,
        inflation_factor: Decimal::ONE,
        segments: vec![
            BracketSegment {
                lower_bound: Decimal::ZERO,
                upper_bound: Some(config.oas_recovery_threshold),
                marginal_rate: Decimal::ZERO,
            },
            BracketSegment {
                lower_bound: config.oas_recovery_threshold,
                upper_bound: None,
                marginal_rate: config.oas_recovery_rate,
            },
        ],
        base_credit: Decimal::ZERO,
        base_credit_rate: Decimal::ZERO,
    }
}

/// OAS repayable on `net_income`, never more than `oas_received`.
///
/// # Arguments
///
/// * `net_income` - Net income for the year
/// * `oas_received` - OAS benefit paid in the year; negative is treated as zero
/// * `config` - The year's recovery threshold and rate
///
/// # Returns
///
/// The recovery tax in dollars, rounded to cents.
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
/// use tax_core::calculations::oas_recovery_tax;
///
/// assert_eq!(oas_recovery_tax(dec!(100000), dec!(8500), &config), dec!(1350.45));
/// // Fully recovered well above the threshold.
/// assert_eq!(oas_recovery_tax(dec!(200000), dec!(8500), &config), dec!(8500));
/// ```
pub fn oas_recovery_tax(
    net_income: Decimal,
    oas_received: Decimal,
    config: &TaxYearConfig,
) -> Decimal {
    let recovery = evaluate_tax(&oas_recovery_schedule(config), net_income);
    recovery.min(non_negative(oas_received))
}
