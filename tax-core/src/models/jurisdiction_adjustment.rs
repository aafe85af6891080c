use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Jurisdiction;

/// Federal abatement granted to Quebec residents (16.5 %).
pub const QUEBEC_ABATEMENT_RATE: Decimal = Decimal::from_parts(165, 0, 0, false, 3);

/// Post-evaluation correction applied to federal tax for residents of a
/// jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionAdjustment {
    pub jurisdiction: Jurisdiction,
    pub abatement_rate: Decimal,
}

impl JurisdictionAdjustment {
    /// Adjustment for residents of `residence` using the statutory Quebec
    /// abatement. Every other code, federal included, gets no adjustment.
    pub fn for_residence(residence: Jurisdiction) -> Self {
        Self::with_quebec_rate(residence, QUEBEC_ABATEMENT_RATE)
    }

    /// Same as [`for_residence`](Self::for_residence) but with the Quebec
    /// rate taken from yearly parameters.
    pub fn with_quebec_rate(
        residence: Jurisdiction,
        quebec_rate: Decimal,
    ) -> Self {
        let abatement_rate = match residence {
            Jurisdiction::Quebec => quebec_rate,
            Jurisdiction::Federal
            | Jurisdiction::Alberta
            | Jurisdiction::BritishColumbia
            | Jurisdiction::Manitoba
            | Jurisdiction::NewBrunswick
            | Jurisdiction::NewfoundlandAndLabrador
            | Jurisdiction::NovaScotia
            | Jurisdiction::NorthwestTerritories
            | Jurisdiction::Nunavut
            | Jurisdiction::Ontario
            | Jurisdiction::PrinceEdwardIsland
            | Jurisdiction::Saskatchewan
            | Jurisdiction::Yukon => Decimal::ZERO,
        };

        Self {
            jurisdiction: residence,
            abatement_rate,
        }
    }

    /// Fraction of federal tax that remains after the abatement.
    pub fn retained_fraction(&self) -> Decimal {
        Decimal::ONE - self.abatement_rate
    }
}
