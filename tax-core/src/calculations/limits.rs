//! Registered plan limits: RRSP, TFSA and RESP grant.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::TaxYearConfig;

/// New RRSP deduction room: a share of last year's earned income, capped
/// at the year's dollar limit.
///
/// # Arguments
///
/// * `prior_year_earned_income` - Earned income for the previous year
/// * `config` - The year's earned income rate and dollar limit
///
/// # Returns
///
/// The room added this year, rounded to cents. Unused room carried forward
/// is not included.
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
/// use tax_core::calculations::rrsp_deduction_limit;
///
/// assert_eq!(rrsp_deduction_limit(dec!(100000), &config), dec!(18000));
/// assert_eq!(rrsp_deduction_limit(dec!(250000), &config), dec!(31560));
/// ```
pub fn rrsp_deduction_limit(
    prior_year_earned_income: Decimal,
    config: &TaxYearConfig,
) -> Decimal {
    let room = non_negative(prior_year_earned_income) * config.rrsp_earned_income_rate;
    round_half_up(room.min(config.rrsp_dollar_limit))
}

/// TFSA room added for the year.
pub fn tfsa_contribution_room(config: &TaxYearConfig) -> Decimal {
    config.tfsa_annual_limit
}

/// Basic Canada Education Savings Grant on a year's RESP contribution.
///
/// Only the contribution up to the yearly cap attracts the grant, so the
/// grant is at most `cesg_contribution_cap * cesg_rate`.
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
/// use tax_core::calculations::resp_grant;
///
/// assert_eq!(resp_grant(dec!(2000), &config), dec!(400.00));
/// assert_eq!(resp_grant(dec!(5000), &config), dec!(500.00));
/// ```
pub fn resp_grant(
    contribution: Decimal,
    config: &TaxYearConfig,
) -> Decimal {
    let eligible = non_negative(contribution).min(config.cesg_contribution_cap);
    round_half_up(eligible * config.cesg_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> TaxYearConfig {
        TaxYearConfig::sample_2024()
    }

    #[test]
    fn rrsp_room_is_eighteen_percent_of_earned_income() {
        assert_eq!(rrsp_deduction_limit(dec!(100000), &config()), dec!(18000.00));
    }

    #[test]
    fn rrsp_room_is_capped_at_dollar_limit() {
        assert_eq!(rrsp_deduction_limit(dec!(250000), &config()), dec!(31560));
    }

    #[test]
    fn rrsp_room_is_zero_for_losses() {
        assert_eq!(rrsp_deduction_limit(dec!(-5000), &config()), Decimal::ZERO);
    }

    #[test]
    fn tfsa_room_is_annual_limit() {
        assert_eq!(tfsa_contribution_room(&config()), dec!(7000));
    }

    #[test]
    fn resp_grant_is_twenty_percent() {
        assert_eq!(resp_grant(dec!(2000), &config()), dec!(400.00));
    }

    #[test]
    fn resp_grant_is_capped() {
        assert_eq!(resp_grant(dec!(5000), &config()), dec!(500.00));
    }
}
