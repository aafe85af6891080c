use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Jurisdiction;

/// Inputs for a combined federal and provincial income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxRequest {
    pub gross_income: Decimal,
    /// Province or territory of residence on December 31.
    pub residence: Jurisdiction,
    pub tax_year: i32,
    pub inflation_rate: Decimal,
    pub years_to_inflate: u32,
    /// Federal non-refundable credits beyond the basic personal amount,
    /// already converted to tax dollars.
    pub federal_credits: Decimal,
    /// Provincial non-refundable credits beyond the basic personal amount,
    /// already converted to tax dollars.
    pub provincial_credits: Decimal,
}

impl IncomeTaxRequest {
    /// A request for `gross_income` in the table year with no indexation
    /// and no extra credits.
    pub fn new(
        gross_income: Decimal,
        residence: Jurisdiction,
        tax_year: i32,
    ) -> Self {
        Self {
            gross_income,
            residence,
            tax_year,
            inflation_rate: Decimal::ZERO,
            years_to_inflate: 0,
            federal_credits: Decimal::ZERO,
            provincial_credits: Decimal::ZERO,
        }
    }
}

/// Combined federal and provincial figures for one taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxSummary {
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub total_tax: Decimal,
    pub after_tax_income: Decimal,
    pub effective_tax_rate: Decimal,
    pub marginal_tax_rate: Decimal,
}
