//! Combined federal and provincial income tax.
//!
//! Each jurisdiction runs through the same pipeline:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Index the bracket table and basic personal amount by inflation |
//! | 2    | Evaluate bracket tax on income (negative income counts as zero) |
//! | 3    | Federal only: apply the residence's abatement (Quebec) |
//! | 4    | Subtract basic personal credit plus other credits, minimum 0 |
//! | 5    | Derive marginal and effective rates |
//!
//! [`IncomeTaxCalculator`] runs the pipeline for the federal table and the
//! residence's table and sums the two.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::IncomeTaxCalculator;
//! use tax_core::{BracketSegment, BracketTable, IncomeTaxRequest, Jurisdiction, TaxTables};
//!
//! let flat = |jurisdiction, rate| {
//!     BracketTable::new(
//!         jurisdiction,
//!         2024,
//!         vec![BracketSegment {
//!             lower_bound: dec!(0),
//!             upper_bound: None,
//!             marginal_rate: rate,
//!         }],
//!         dec!(0),
//!         rate,
//!     )
//!     .unwrap()
//! };
//!
//! let mut tables = TaxTables::new();
//! tables.insert_table(flat(Jurisdiction::Federal, dec!(0.15)));
//! tables.insert_table(flat(Jurisdiction::Alberta, dec!(0.10)));
//!
//! let calculator = IncomeTaxCalculator::new(&tables);
//! let summary = calculator
//!     .calculate(&IncomeTaxRequest::new(dec!(60000), Jurisdiction::Alberta, 2024))
//!     .unwrap();
//!
//! assert_eq!(summary.federal_tax, dec!(9000.00));
//! assert_eq!(summary.provincial_tax, dec!(6000.00));
//! assert_eq!(summary.total_tax, dec!(15000.00));
//! assert_eq!(summary.after_tax_income, dec!(45000.00));
//! assert_eq!(summary.marginal_tax_rate, dec!(0.25));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::brackets::{evaluate_tax, marginal_rate};
use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::indexation::IndexationError;
use crate::calculations::{apply_adjustment, apply_credit, effective_rate, index_table};
use crate::models::{
    BracketTable, IncomeTaxRequest, IncomeTaxSummary, Jurisdiction, JurisdictionAdjustment,
    QUEBEC_ABATEMENT_RATE, TaxResult,
};
use crate::tables::{TableError, TaxTables};

/// Errors from [`IncomeTaxCalculator::calculate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Indexation(#[from] IndexationError),

    /// Residence must be a province or territory.
    #[error("{0} is not a province or territory of residence")]
    InvalidResidence(Jurisdiction),
}

/// Runs the full pipeline for one jurisdiction's table.
///
/// `credit` is added to the table's indexed basic personal credit before it
/// is subtracted. `adjustment` is consulted only when `table` is the
/// federal table.
///
/// # Errors
///
/// Returns [`CalculationError::Indexation`] if indexing the table by
/// `inflation_rate` over `years_to_inflate` overflows.
pub fn calculate_jurisdiction_tax(
    table: &BracketTable,
    income: Decimal,
    inflation_rate: Decimal,
    years_to_inflate: u32,
    credit: Decimal,
    adjustment: &JurisdictionAdjustment,
) -> Result<TaxResult, CalculationError> {
    let income = non_negative(income);
    let indexed = index_table(table, inflation_rate, years_to_inflate)?;

    let bracket_tax = evaluate_tax(&indexed, income);
    let mut rate = marginal_rate(&indexed, income);
    let gross_tax_before_credit = if table.jurisdiction().is_federal() {
        rate *= adjustment.retained_fraction();
        apply_adjustment(bracket_tax, adjustment)
    } else {
        bracket_tax
    };

    let total_credit = round_half_up(indexed.base_credit_amount() + credit);
    let final_tax = apply_credit(gross_tax_before_credit, total_credit);

    debug!(
        jurisdiction = %table.jurisdiction(),
        %income,
        %bracket_tax,
        %gross_tax_before_credit,
        %total_credit,
        %final_tax,
        "evaluated jurisdiction tax"
    );

    Ok(TaxResult {
        gross_tax_before_credit,
        marginal_rate: rate,
        effective_rate: effective_rate(final_tax, income),
        final_tax,
    })
}

/// Calculator for combined federal and provincial income tax.
///
/// Borrows a [`TaxTables`] registry; any number of calculators can share
/// the same registry.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Federal and provincial results for `request`, summed.
    ///
    /// The Quebec abatement rate comes from the year's parameters when they
    /// are registered and falls back to the statutory 16.5 % otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if:
    /// - the residence is [`Jurisdiction::Federal`]
    /// - the federal or provincial table for the year is not registered
    /// - indexing the brackets overflows
    pub fn calculate(
        &self,
        request: &IncomeTaxRequest,
    ) -> Result<IncomeTaxSummary, CalculationError> {
        let (federal, provincial) = self.calculate_parts(request)?;

        let income = non_negative(request.gross_income);
        let total_tax = federal.final_tax + provincial.final_tax;
        let summary = IncomeTaxSummary {
            federal_tax: federal.final_tax,
            provincial_tax: provincial.final_tax,
            total_tax,
            after_tax_income: income - total_tax,
            effective_tax_rate: effective_rate(total_tax, income),
            marginal_tax_rate: federal.marginal_rate + provincial.marginal_rate,
        };

        info!(
            residence = %request.residence,
            tax_year = request.tax_year,
            %income,
            total_tax = %summary.total_tax,
            "calculated income tax"
        );
        Ok(summary)
    }

    /// The per-jurisdiction results behind [`calculate`](Self::calculate),
    /// federal first.
    ///
    /// # Errors
    ///
    /// Same as [`calculate`](Self::calculate).
    pub fn calculate_parts(
        &self,
        request: &IncomeTaxRequest,
    ) -> Result<(TaxResult, TaxResult), CalculationError> {
        if request.residence.is_federal() {
            return Err(CalculationError::InvalidResidence(request.residence));
        }

        let federal_table = self.tables.table(Jurisdiction::Federal, request.tax_year)?;
        let provincial_table = self.tables.table(request.residence, request.tax_year)?;
        let adjustment = JurisdictionAdjustment::with_quebec_rate(
            request.residence,
            self.quebec_abatement_rate(request.tax_year),
        );

        let federal = calculate_jurisdiction_tax(
            federal_table,
            request.gross_income,
            request.inflation_rate,
            request.years_to_inflate,
            request.federal_credits,
            &adjustment,
        )?;
        let provincial = calculate_jurisdiction_tax(
            provincial_table,
            request.gross_income,
            request.inflation_rate,
            request.years_to_inflate,
            request.provincial_credits,
            &adjustment,
        )?;

        Ok((federal, provincial))
    }

    fn quebec_abatement_rate(
        &self,
        tax_year: i32,
    ) -> Decimal {
        self.tables
            .year_config(tax_year)
            .map(|config| config.quebec_abatement_rate)
            .unwrap_or(QUEBEC_ABATEMENT_RATE)
    }
}
