use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Jurisdiction;

/// One marginal-rate band of a bracket table.
///
/// `upper_bound` is `None` for the top, unbounded segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSegment {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
}

impl BracketSegment {
    /// Returns `true` if `income` falls in `(lower_bound, upper_bound]`.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income > self.lower_bound && self.upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// Structural problems found while building a [`BracketTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table has no segments")]
    Empty,

    #[error("first segment must start at or above zero, got {0}")]
    NegativeLowerBound(Decimal),

    #[error("segment {index} has upper bound {upper} not above its lower bound {lower}")]
    InvertedSegment {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("segment {index} starts at {lower} but the previous segment ends at {previous_upper}")]
    Gap {
        index: usize,
        lower: Decimal,
        previous_upper: Decimal,
    },

    #[error("segment {0} is unbounded but is not the last segment")]
    UnboundedBeforeLast(usize),

    #[error("last segment must be unbounded")]
    BoundedTop,

    #[error("segment {index} has rate {rate} outside [0, 1]")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("base credit must be non-negative, got {0}")]
    NegativeBaseCredit(Decimal),

    #[error("base credit rate must be between 0 and 1, got {0}")]
    InvalidBaseCreditRate(Decimal),
}

/// Marginal-rate schedule for one jurisdiction and tax year.
///
/// Built once from published tables and never mutated afterwards. Construct
/// it with [`BracketTable::new`], which checks that the segments are
/// ascending, contiguous and end in an unbounded segment.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
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
/// assert_eq!(table.base_credit_amount(), dec!(2250.00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    jurisdiction: Jurisdiction,
    tax_year: i32,
    segments: Vec<BracketSegment>,
    base_credit: Decimal,
    base_credit_rate: Decimal,
}

impl BracketTable {
    /// Validates and builds a table.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the segment list is empty, starts
    /// below zero, has gaps, overlaps or inverted bounds, has an unbounded
    /// segment anywhere but last, has a bounded last segment, or carries a
    /// rate outside `[0, 1]`. Rates that decrease from one segment to the
    /// next are accepted here; loaders report them.
    pub fn new(
        jurisdiction: Jurisdiction,
        tax_year: i32,
        segments: Vec<BracketSegment>,
        base_credit: Decimal,
        base_credit_rate: Decimal,
    ) -> Result<Self, BracketTableError> {
        validate_segments(&segments)?;
        if base_credit < Decimal::ZERO {
            return Err(BracketTableError::NegativeBaseCredit(base_credit));
        }
        if base_credit_rate < Decimal::ZERO || base_credit_rate > Decimal::ONE {
            return Err(BracketTableError::InvalidBaseCreditRate(base_credit_rate));
        }

        Ok(Self {
            jurisdiction,
            tax_year,
            segments,
            base_credit,
            base_credit_rate,
        })
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn segments(&self) -> &[BracketSegment] {
        &self.segments
    }

    /// Basic personal amount on which the non-refundable credit is computed.
    pub fn base_credit(&self) -> Decimal {
        self.base_credit
    }

    pub fn base_credit_rate(&self) -> Decimal {
        self.base_credit_rate
    }

    /// Value of the basic personal credit in tax dollars.
    pub fn base_credit_amount(&self) -> Decimal {
        self.base_credit * self.base_credit_rate
    }

    /// Returns `true` when every segment's rate is at least the previous one.
    pub fn is_progressive(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].marginal_rate <= pair[1].marginal_rate)
    }
}

fn validate_segments(segments: &[BracketSegment]) -> Result<(), BracketTableError> {
    let first = segments.first().ok_or(BracketTableError::Empty)?;
    if first.lower_bound < Decimal::ZERO {
        return Err(BracketTableError::NegativeLowerBound(first.lower_bound));
    }

    let last_index = segments.len() - 1;
    for (index, segment) in segments.iter().enumerate() {
        if segment.marginal_rate < Decimal::ZERO || segment.marginal_rate > Decimal::ONE {
            return Err(BracketTableError::InvalidRate {
                index,
                rate: segment.marginal_rate,
            });
        }

        match segment.upper_bound {
            Some(upper) if upper <= segment.lower_bound => {
                return Err(BracketTableError::InvertedSegment {
                    index,
                    lower: segment.lower_bound,
                    upper,
                });
            }
            Some(_) if index == last_index => return Err(BracketTableError::BoundedTop),
            None if index != last_index => {
                return Err(BracketTableError::UnboundedBeforeLast(index));
            }
            _ => {}
        }

        if index > 0 {
            // Earlier iterations guarantee the previous segment is bounded.
            let previous_upper = segments[index - 1].upper_bound.unwrap_or(Decimal::MAX);
            if previous_upper != segment.lower_bound {
                return Err(BracketTableError::Gap {
                    index,
                    lower: segment.lower_bound,
                    previous_upper,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn segment(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> BracketSegment {
        BracketSegment {
            lower_bound: lower,
            upper_bound: upper,
            marginal_rate: rate,
        }
    }

    fn two_segments() -> Vec<BracketSegment> {
        vec![
            segment(dec!(0), Some(dec!(50000)), dec!(0.15)),
            segment(dec!(50000), None, dec!(0.26)),
        ]
    }

    fn build(segments: Vec<BracketSegment>) -> Result<BracketTable, BracketTableError> {
        BracketTable::new(Jurisdiction::Federal, 2024, segments, dec!(15000), dec!(0.15))
    }

    #[test]
    fn new_accepts_contiguous_segments() {
        let table = build(two_segments()).expect("valid table");

        assert_eq!(table.jurisdiction(), Jurisdiction::Federal);
        assert_eq!(table.tax_year(), 2024);
        assert_eq!(table.segments().len(), 2);
        assert!(table.is_progressive());
    }

    #[test]
    fn new_rejects_empty_table() {
        assert_eq!(build(vec![]), Err(BracketTableError::Empty));
    }

    #[test]
    fn new_rejects_negative_start() {
        let segments = vec![segment(dec!(-1), None, dec!(0.15))];

        assert_eq!(
            build(segments),
            Err(BracketTableError::NegativeLowerBound(dec!(-1)))
        );
    }

    #[test]
    fn new_rejects_gap_between_segments() {
        let segments = vec![
            segment(dec!(0), Some(dec!(50000)), dec!(0.15)),
            segment(dec!(50001), None, dec!(0.26)),
        ];

        assert_eq!(
            build(segments),
            Err(BracketTableError::Gap {
                index: 1,
                lower: dec!(50001),
                previous_upper: dec!(50000),
            })
        );
    }

    #[test]
    fn new_rejects_bounded_top() {
        let segments = vec![segment(dec!(0), Some(dec!(50000)), dec!(0.15))];

        assert_eq!(build(segments), Err(BracketTableError::BoundedTop));
    }

    #[test]
    fn new_rejects_unbounded_middle_segment() {
        let segments = vec![
            segment(dec!(0), None, dec!(0.15)),
            segment(dec!(50000), None, dec!(0.26)),
        ];

        assert_eq!(build(segments), Err(BracketTableError::UnboundedBeforeLast(0)));
    }

    #[test]
    fn new_rejects_inverted_segment() {
        let segments = vec![
            segment(dec!(100), Some(dec!(100)), dec!(0.15)),
            segment(dec!(100), None, dec!(0.26)),
        ];

        assert!(matches!(
            build(segments),
            Err(BracketTableError::InvertedSegment { index: 0, .. })
        ));
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let segments = vec![segment(dec!(0), None, dec!(1.5))];

        assert_eq!(
            build(segments),
            Err(BracketTableError::InvalidRate {
                index: 0,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn new_rejects_negative_base_credit() {
        let result = BracketTable::new(
            Jurisdiction::Ontario,
            2024,
            two_segments(),
            dec!(-1),
            dec!(0.0505),
        );

        assert_eq!(result, Err(BracketTableError::NegativeBaseCredit(dec!(-1))));
    }

    #[test]
    fn regressive_rates_are_accepted_but_flagged() {
        let segments = vec![
            segment(dec!(0), Some(dec!(50000)), dec!(0.26)),
            segment(dec!(50000), None, dec!(0.15)),
        ];

        let table = build(segments).expect("structure is valid");

        assert!(!table.is_progressive());
    }

    #[test]
    fn segment_contains_is_upper_inclusive() {
        let s = segment(dec!(0), Some(dec!(50000)), dec!(0.15));

        assert!(!s.contains(dec!(0)));
        assert!(s.contains(dec!(0.01)));
        assert!(s.contains(dec!(50000)));
        assert!(!s.contains(dec!(50000.01)));
    }
}
