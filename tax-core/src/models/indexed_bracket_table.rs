use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BracketSegment, Jurisdiction};

/// A [`BracketTable`](crate::BracketTable) projected forward by inflation.
///
/// Produced fresh by [`index_table`](crate::calculations::index_table) for a
/// single calculation and owned by that calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedBracketTable {
    pub jurisdiction: Jurisdiction,
    pub tax_year: i32,
    /// `(1 + inflation_rate)^years_to_inflate`; exactly one when no
    /// indexation was requested.
    pub inflation_factor: Decimal,
    pub segments: Vec<BracketSegment>,
    pub base_credit: Decimal,
    pub base_credit_rate: Decimal,
}

impl IndexedBracketTable {
    /// Value of the indexed basic personal credit in tax dollars.
    pub fn base_credit_amount(&self) -> Decimal {
        self.base_credit * self.base_credit_rate
    }
}
