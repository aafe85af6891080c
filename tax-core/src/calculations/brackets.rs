//! Progressive bracket evaluation.
//!
//! Tax is accumulated segment by segment: each segment taxes only the slice
//! of income that falls inside it, at that segment's rate. For the table
//!
//! | Lower  | Upper  | Rate |
//! |--------|--------|------|
//! | 0      | 50,000 | 15 % |
//! | 50,000 | —      | 26 % |
//!
//! an income of 75,000 owes `50,000 × 0.15 + 25,000 × 0.26 = 14,000`.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{BracketSegment, IndexedBracketTable};

/// Clamps negative income to zero, logging when it does so.
fn taxable_income(income: Decimal) -> Decimal {
    if income < Decimal::ZERO {
        warn!(%income, "negative income treated as zero");
        return Decimal::ZERO;
    }
    income
}

/// Cumulative bracket tax on `income`, rounded to cents.
///
/// Negative income is treated as zero. The result is non-decreasing in
/// `income` and zero at or below the first segment's lower bound.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::{evaluate_tax, index_table};
/// use tax_core::{BracketSegment, BracketTable, Jurisdiction};
///
/// let table = BracketTable::new(
///     Jurisdiction::Federal,
///     2024,
///     vec![
///         BracketSegment {
///             lower_bound: dec!(0),
///             upper_bound: Some(dec!(50000)),
///             marginal_rate: dec!(0.15),
///         },
///         BracketSegment {
///             lower_bound: dec!(50000),
///             upper_bound: None,
///             marginal_rate: dec!(0.26),
///         },
///     ],
///     dec!(0),
///     dec!(0.15),
/// )
/// .unwrap();
///
/// let indexed = index_table(&table, dec!(0), 0).unwrap();
///
/// assert_eq!(evaluate_tax(&indexed, dec!(75000)), dec!(14000.00));
/// ```
pub fn evaluate_tax(
    indexed_table: &IndexedBracketTable,
    income: Decimal,
) -> Decimal {
    let income = taxable_income(income);
    let mut tax = Decimal::ZERO;

    for segment in &indexed_table.segments {
        if income <= segment.lower_bound {
            break;
        }

        let top = segment
            .upper_bound
            .map_or(income, |upper| income.min(upper));
        tax += (top - segment.lower_bound) * segment.marginal_rate;

        if segment.upper_bound.is_none_or(|upper| income <= upper) {
            break;
        }
    }

    round_half_up(tax)
}

/// The segment whose range `(lower, upper]` holds `income`, or the first
/// segment when `income` is at or below the lowest bound.
pub fn segment_for_income(
    indexed_table: &IndexedBracketTable,
    income: Decimal,
) -> Option<&BracketSegment> {
    indexed_table
        .segments
        .iter()
        .find(|segment| segment.contains(income))
        .or_else(|| indexed_table.segments.first())
}

/// Rate applied to the last dollar of `income`.
///
/// Income exactly on a boundary takes the lower segment's rate, since
/// segments are closed above.
///
/// # Returns
///
/// The marginal rate as a fraction. Zero only for a table with no segments,
/// which [`BracketTable::new`](crate::BracketTable::new) never produces.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::{index_table, marginal_rate};
/// use tax_core::{BracketSegment, BracketTable, Jurisdiction};
///
/// let table = BracketTable::new(
///     Jurisdiction::Alberta,
///     2024,
///     vec![
///         BracketSegment {
///             lower_bound: dec!(0),
///             upper_bound: Some(dec!(148269)),
///             marginal_rate: dec!(0.10),
///         },
///         BracketSegment {
///             lower_bound: dec!(148269),
///             upper_bound: None,
///             marginal_rate: dec!(0.12),
///         },
///     ],
///     dec!(21885),
///     dec!(0.10),
/// )
/// .unwrap();
/// let indexed = index_table(&table, dec!(0), 0).unwrap();
///
/// assert_eq!(marginal_rate(&indexed, dec!(148269)), dec!(0.10));
/// assert_eq!(marginal_rate(&indexed, dec!(148270)), dec!(0.12));
/// ```
pub fn marginal_rate(
    indexed_table: &IndexedBracketTable,
    income: Decimal,
) -> Decimal {
    segment_for_income(indexed_table, income)
        .map(|segment| segment.marginal_rate)
        .unwrap_or(Decimal::ZERO)
}
