use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A [`TaxYearConfig`] field outside its allowed range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },
}

/// Scalar parameters published for a tax year alongside the bracket tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub quebec_abatement_rate: Decimal,

    // CPP / QPP
    pub cpp_rate: Decimal,
    pub qpp_rate: Decimal,
    pub ympe: Decimal,
    pub cpp_basic_exemption: Decimal,

    // EI / QPIP
    pub ei_rate: Decimal,
    pub ei_rate_quebec: Decimal,
    pub ei_max_insurable_earnings: Decimal,
    pub qpip_rate: Decimal,
    pub qpip_max_insurable_earnings: Decimal,

    // OAS recovery tax
    pub oas_recovery_threshold: Decimal,
    pub oas_recovery_rate: Decimal,

    // Dividends (federal)
    pub eligible_dividend_gross_up: Decimal,
    pub eligible_dividend_credit_rate: Decimal,
    pub non_eligible_dividend_gross_up: Decimal,
    pub non_eligible_dividend_credit_rate: Decimal,

    // Registered plans
    pub rrsp_dollar_limit: Decimal,
    pub rrsp_earned_income_rate: Decimal,
    pub tfsa_annual_limit: Decimal,
    pub cesg_rate: Decimal,
    pub cesg_contribution_cap: Decimal,
}

impl TaxYearConfig {
    /// Checks that every rate lies in `[0, 1]` and every threshold, cap,
    /// limit and gross-up is non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`TaxYearConfigError`].
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        let rates = [
            ("quebec_abatement_rate", self.quebec_abatement_rate),
            ("cpp_rate", self.cpp_rate),
            ("qpp_rate", self.qpp_rate),
            ("ei_rate", self.ei_rate),
            ("ei_rate_quebec", self.ei_rate_quebec),
            ("qpip_rate", self.qpip_rate),
            ("oas_recovery_rate", self.oas_recovery_rate),
            ("eligible_dividend_credit_rate", self.eligible_dividend_credit_rate),
            ("non_eligible_dividend_credit_rate", self.non_eligible_dividend_credit_rate),
            ("rrsp_earned_income_rate", self.rrsp_earned_income_rate),
            ("cesg_rate", self.cesg_rate),
        ];
        if let Some((field, value)) = rates
            .into_iter()
            .find(|(_, value)| *value < Decimal::ZERO || *value > Decimal::ONE)
        {
            return Err(TaxYearConfigError::InvalidRate { field, value });
        }

        let amounts = [
            ("ympe", self.ympe),
            ("cpp_basic_exemption", self.cpp_basic_exemption),
            ("ei_max_insurable_earnings", self.ei_max_insurable_earnings),
            ("qpip_max_insurable_earnings", self.qpip_max_insurable_earnings),
            ("oas_recovery_threshold", self.oas_recovery_threshold),
            ("eligible_dividend_gross_up", self.eligible_dividend_gross_up),
            ("non_eligible_dividend_gross_up", self.non_eligible_dividend_gross_up),
            ("rrsp_dollar_limit", self.rrsp_dollar_limit),
            ("tfsa_annual_limit", self.tfsa_annual_limit),
            ("cesg_contribution_cap", self.cesg_contribution_cap),
        ];
        if let Some((field, value)) = amounts.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
            return Err(TaxYearConfigError::NegativeAmount { field, value });
        }

        Ok(())
    }
}

#[cfg(test)]
impl TaxYearConfig {
    /// Published 2024 parameters, for tests.
    pub(crate) fn sample_2024() -> Self {
        use rust_decimal_macros::dec;

        Self {
            tax_year: 2024,
            quebec_abatement_rate: dec!(0.165),
            cpp_rate: dec!(0.0595),
            qpp_rate: dec!(0.064),
            ympe: dec!(68500),
            cpp_basic_exemption: dec!(3500),
            ei_rate: dec!(0.0166),
            ei_rate_quebec: dec!(0.0132),
            ei_max_insurable_earnings: dec!(63200),
            qpip_rate: dec!(0.00494),
            qpip_max_insurable_earnings: dec!(94000),
            oas_recovery_threshold: dec!(90997),
            oas_recovery_rate: dec!(0.15),
            eligible_dividend_gross_up: dec!(0.38),
            eligible_dividend_credit_rate: dec!(0.150198),
            non_eligible_dividend_gross_up: dec!(0.15),
            non_eligible_dividend_credit_rate: dec!(0.090301),
            rrsp_dollar_limit: dec!(31560),
            rrsp_earned_income_rate: dec!(0.18),
            tfsa_annual_limit: dec!(7000),
            cesg_rate: dec!(0.20),
            cesg_contribution_cap: dec!(2500),
        }
    }
}
