//! Payroll contributions: CPP/QPP and EI/QPIP.
//!
//! | Item | Base | Rate |
//! |------|------|------|
//! | CPP / QPP | `min(income, YMPE) - basic exemption` | CPP rate, or QPP rate for Quebec |
//! | EI | `min(income, max insurable)` | EI rate, reduced for Quebec |
//! | QPIP | `min(income, QPIP max insurable)` | Quebec residents only |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::{Jurisdiction, TaxYearConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PensionPlan {
    /// Canada Pension Plan.
    Cpp,
    /// Quebec Pension Plan.
    Qpp,
}

impl PensionPlan {
    pub fn for_residence(residence: Jurisdiction) -> Self {
        match residence {
            Jurisdiction::Quebec => Self::Qpp,
            _ => Self::Cpp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionContribution {
    pub plan: PensionPlan,
    /// Earnings between the basic exemption and the YMPE.
    pub pensionable_earnings: Decimal,
    /// Employee contribution.
    pub contribution: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentInsurancePremiums {
    pub insurable_earnings: Decimal,
    pub ei_premium: Decimal,
    /// Zero outside Quebec.
    pub qpip_premium: Decimal,
}

impl EmploymentInsurancePremiums {
    pub fn total(&self) -> Decimal {
        self.ei_premium + self.qpip_premium
    }
}

/// Employee CPP or QPP contribution on `employment_income`.
///
/// Quebec residents contribute to the QPP at the QPP rate; everyone else to
/// the CPP. Both plans share the YMPE and basic exemption.
///
/// # Arguments
///
/// * `employment_income` - Gross employment income; negative is treated as zero
/// * `residence` - Province or territory of residence, which picks the plan
/// * `config` - The year's YMPE, basic exemption and contribution rates
///
/// # Returns
///
/// The plan, pensionable earnings and the contribution rounded to cents.
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
/// use tax_core::Jurisdiction;
/// use tax_core::calculations::{PensionPlan, pension_contribution};
///
/// // (68500 - 3500) x 5.95 %
/// let cpp = pension_contribution(dec!(75000), Jurisdiction::Ontario, &config);
/// assert_eq!(cpp.plan, PensionPlan::Cpp);
/// assert_eq!(cpp.contribution, dec!(3867.50));
///
/// let qpp = pension_contribution(dec!(75000), Jurisdiction::Quebec, &config);
/// assert_eq!(qpp.plan, PensionPlan::Qpp);
/// assert_eq!(qpp.contribution, dec!(4160.00));
/// ```
pub fn pension_contribution(
    employment_income: Decimal,
    residence: Jurisdiction,
    config: &TaxYearConfig,
) -> PensionContribution {
    let plan = PensionPlan::for_residence(residence);
    let rate = match plan {
        PensionPlan::Cpp => config.cpp_rate,
        PensionPlan::Qpp => config.qpp_rate,
    };

    let capped = non_negative(employment_income).min(config.ympe);
    let pensionable_earnings = non_negative(capped - config.cpp_basic_exemption);

    PensionContribution {
        plan,
        pensionable_earnings,
        contribution: round_half_up(pensionable_earnings * rate),
    }
}

/// Employee EI premium, plus the QPIP premium for Quebec residents.
///
/// Quebec residents pay EI at the reduced Quebec rate because QPIP covers
/// parental benefits there. Each premium has its own insurable maximum.
///
/// # Arguments
///
/// * `employment_income` - Gross employment income; negative is treated as zero
/// * `residence` - Province or territory of residence
/// * `config` - The year's EI and QPIP rates and insurable maximums
pub fn employment_insurance_premiums(
    employment_income: Decimal,
    residence: Jurisdiction,
    config: &TaxYearConfig,
) -> EmploymentInsurancePremiums {
    let income = non_negative(employment_income);
    let insurable_earnings = income.min(config.ei_max_insurable_earnings);

    let (ei_rate, qpip_premium) = if residence == Jurisdiction::Quebec {
        let qpip_earnings = income.min(config.qpip_max_insurable_earnings);
        (
            config.ei_rate_quebec,
            round_half_up(qpip_earnings * config.qpip_rate),
        )
    } else {
        (config.ei_rate, Decimal::ZERO)
    };

    EmploymentInsurancePremiums {
        insurable_earnings,
        ei_premium: round_half_up(insurable_earnings * ei_rate),
        qpip_premium,
    }
}
