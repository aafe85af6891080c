//! Jurisdiction-specific corrections to federal tax.
//!
//! Quebec residents receive a refundable abatement of 16.5 % of basic
//! federal tax. No other jurisdiction adjusts federal tax, and provincial
//! tax is never adjusted here.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{Jurisdiction, JurisdictionAdjustment};

/// Federal tax owed by a resident of `residence` after the abatement.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::Jurisdiction;
/// use tax_core::calculations::apply_abatement;
///
/// assert_eq!(apply_abatement(dec!(14000), Jurisdiction::Quebec), dec!(11690.00));
/// assert_eq!(apply_abatement(dec!(14000), Jurisdiction::Ontario), dec!(14000));
/// ```
pub fn apply_abatement(
    gross_federal_tax: Decimal,
    residence: Jurisdiction,
) -> Decimal {
    apply_adjustment(
        gross_federal_tax,
        &JurisdictionAdjustment::for_residence(residence),
    )
}

/// Applies `adjustment` to federal tax.
///
/// A zero abatement returns the input unchanged. Otherwise the retained
/// share is rounded half-up to cents and capped at the input, so a
/// non-negative tax is never increased.
///
/// # Arguments
///
/// * `gross_federal_tax` - Federal tax before the abatement
/// * `adjustment` - Residence-specific abatement to apply
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::apply_adjustment;
/// use tax_core::{Jurisdiction, JurisdictionAdjustment};
///
/// let adjustment = JurisdictionAdjustment::with_quebec_rate(Jurisdiction::Quebec, dec!(0.20));
///
/// assert_eq!(apply_adjustment(dec!(1000), &adjustment), dec!(800.00));
/// ```
pub fn apply_adjustment(
    gross_federal_tax: Decimal,
    adjustment: &JurisdictionAdjustment,
) -> Decimal {
    if adjustment.abatement_rate.is_zero() {
        return gross_federal_tax;
    }

    let rounded = round_half_up(gross_federal_tax * adjustment.retained_fraction());
    // Rounding up a sub-cent amount must not lift it above the gross.
    let adjusted = if gross_federal_tax >= Decimal::ZERO {
        rounded.min(gross_federal_tax)
    } else {
        rounded
    };
    debug!(
        jurisdiction = %adjustment.jurisdiction,
        abatement_rate = %adjustment.abatement_rate,
        %gross_federal_tax,
        %adjusted,
        "applied federal abatement"
    );
    adjusted
}
