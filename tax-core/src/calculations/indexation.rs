//! Inflation indexing of bracket thresholds and the basic personal amount.
//!
//! Every bound and the base credit are multiplied by
//! `(1 + inflation_rate)^years_to_inflate`. Rates are untouched and the top
//! segment stays unbounded. Negative inflation is not rejected; it shrinks
//! the brackets.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::{BracketSegment, BracketTable, IndexedBracketTable};

/// Errors from [`inflation_factor`] and [`index_table`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexationError {
    /// The compounded factor, or a bound scaled by it, does not fit in a
    /// `Decimal`.
    #[error("indexing at {inflation_rate} for {years_to_inflate} years overflows")]
    Overflow {
        inflation_rate: Decimal,
        years_to_inflate: u32,
    },
}

/// Compounded growth factor `(1 + inflation_rate)^years_to_inflate`.
///
/// # Arguments
///
/// * `inflation_rate` - Annual rate as a fraction (e.g. `0.02` for 2%)
/// * `years_to_inflate` - Number of years to compound over
///
/// # Returns
///
/// The factor, exactly one when `years_to_inflate` is zero.
///
/// # Errors
///
/// Returns [`IndexationError::Overflow`] if the factor exceeds the range
/// of `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::inflation_factor;
///
/// assert_eq!(inflation_factor(dec!(0.02), 2), Ok(dec!(1.0404)));
/// assert_eq!(inflation_factor(dec!(0.02), 0), Ok(dec!(1)));
/// assert!(inflation_factor(dec!(0.5), 200).is_err());
/// ```
pub fn inflation_factor(
    inflation_rate: Decimal,
    years_to_inflate: u32,
) -> Result<Decimal, IndexationError> {
    let overflow = || IndexationError::Overflow {
        inflation_rate,
        years_to_inflate,
    };
    let growth = Decimal::ONE.checked_add(inflation_rate).ok_or_else(overflow)?;

    (0..years_to_inflate).try_fold(Decimal::ONE, |factor, _| {
        factor.checked_mul(growth).ok_or_else(overflow)
    })
}

/// Projects `table` forward by `years_to_inflate` years.
///
/// With zero years the result has exactly the source table's bounds.
///
/// # Errors
///
/// Returns [`IndexationError::Overflow`] if the factor or any scaled bound
/// exceeds the range of `Decimal`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::index_table;
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
///     dec!(15000),
///     dec!(0.15),
/// )
/// .unwrap();
///
/// let indexed = index_table(&table, dec!(0.10), 1).unwrap();
///
/// assert_eq!(indexed.segments[0].upper_bound, Some(dec!(55000)));
/// assert_eq!(indexed.segments[1].upper_bound, None);
/// assert_eq!(indexed.base_credit, dec!(16500));
/// ```
pub fn index_table(
    table: &BracketTable,
    inflation_rate: Decimal,
    years_to_inflate: u32,
) -> Result<IndexedBracketTable, IndexationError> {
    let factor = inflation_factor(inflation_rate, years_to_inflate)?;
    debug!(
        jurisdiction = %table.jurisdiction(),
        tax_year = table.tax_year(),
        %inflation_rate,
        years_to_inflate,
        %factor,
        "indexing bracket table"
    );

    let scale = |amount: Decimal| {
        amount
            .checked_mul(factor)
            .ok_or(IndexationError::Overflow {
                inflation_rate,
                years_to_inflate,
            })
    };

    let segments = table
        .segments()
        .iter()
        .map(|segment| {
            Ok(BracketSegment {
                lower_bound: scale(segment.lower_bound)?,
                upper_bound: segment.upper_bound.map(scale).transpose()?,
                marginal_rate: segment.marginal_rate,
            })
        })
        .collect::<Result<Vec<_>, IndexationError>>()?;

    Ok(IndexedBracketTable {
        jurisdiction: table.jurisdiction(),
        tax_year: table.tax_year(),
        inflation_factor: factor,
        segments,
        base_credit: scale(table.base_credit())?,
        base_credit_rate: table.base_credit_rate(),
    })
}
