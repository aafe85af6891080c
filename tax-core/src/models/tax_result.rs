use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one jurisdiction's brackets for an income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Bracket tax after any abatement, before credits.
    pub gross_tax_before_credit: Decimal,
    /// Rate applied to the last dollar of income.
    pub marginal_rate: Decimal,
    /// `final_tax / income`, or zero when income is zero.
    pub effective_rate: Decimal,
    /// Tax after non-refundable credits, never negative.
    pub final_tax: Decimal,
}
