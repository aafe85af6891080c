use serde::{Deserialize, Serialize};

/// Taxing jurisdictions: the federal government plus the ten provinces and
/// three territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    Federal,
    Alberta,
    BritishColumbia,
    Manitoba,
    NewBrunswick,
    NewfoundlandAndLabrador,
    NovaScotia,
    NorthwestTerritories,
    Nunavut,
    Ontario,
    PrinceEdwardIsland,
    Quebec,
    Saskatchewan,
    Yukon,
}

impl Jurisdiction {
    const PROVINCES: [Jurisdiction; 13] = [
        Self::Alberta,
        Self::BritishColumbia,
        Self::Manitoba,
        Self::NewBrunswick,
        Self::NewfoundlandAndLabrador,
        Self::NovaScotia,
        Self::NorthwestTerritories,
        Self::Nunavut,
        Self::Ontario,
        Self::PrinceEdwardIsland,
        Self::Quebec,
        Self::Saskatchewan,
        Self::Yukon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "FED",
            Self::Alberta => "AB",
            Self::BritishColumbia => "BC",
            Self::Manitoba => "MB",
            Self::NewBrunswick => "NB",
            Self::NewfoundlandAndLabrador => "NL",
            Self::NovaScotia => "NS",
            Self::NorthwestTerritories => "NT",
            Self::Nunavut => "NU",
            Self::Ontario => "ON",
            Self::PrinceEdwardIsland => "PE",
            Self::Quebec => "QC",
            Self::Saskatchewan => "SK",
            Self::Yukon => "YT",
        }
    }

    /// Parses a jurisdiction code. Matching ignores case and surrounding
    /// whitespace, so `"qc"` and `" QC "` both yield [`Jurisdiction::Quebec`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FED" => Some(Self::Federal),
            "AB" => Some(Self::Alberta),
            "BC" => Some(Self::BritishColumbia),
            "MB" => Some(Self::Manitoba),
            "NB" => Some(Self::NewBrunswick),
            "NL" => Some(Self::NewfoundlandAndLabrador),
            "NS" => Some(Self::NovaScotia),
            "NT" => Some(Self::NorthwestTerritories),
            "NU" => Some(Self::Nunavut),
            "ON" => Some(Self::Ontario),
            "PE" => Some(Self::PrinceEdwardIsland),
            "QC" => Some(Self::Quebec),
            "SK" => Some(Self::Saskatchewan),
            "YT" => Some(Self::Yukon),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::Alberta => "Alberta",
            Self::BritishColumbia => "British Columbia",
            Self::Manitoba => "Manitoba",
            Self::NewBrunswick => "New Brunswick",
            Self::NewfoundlandAndLabrador => "Newfoundland and Labrador",
            Self::NovaScotia => "Nova Scotia",
            Self::NorthwestTerritories => "Northwest Territories",
            Self::Nunavut => "Nunavut",
            Self::Ontario => "Ontario",
            Self::PrinceEdwardIsland => "Prince Edward Island",
            Self::Quebec => "Quebec",
            Self::Saskatchewan => "Saskatchewan",
            Self::Yukon => "Yukon",
        }
    }

    pub fn is_federal(&self) -> bool {
        matches!(self, Self::Federal)
    }

    /// The thirteen provinces and territories, in code order.
    pub fn provinces() -> &'static [Jurisdiction] {
        &Self::PROVINCES
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        let mut all = vec![Jurisdiction::Federal];
        all.extend_from_slice(Jurisdiction::provinces());

        for jurisdiction in all {
            assert_eq!(Jurisdiction::parse(jurisdiction.as_str()), Some(jurisdiction));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(Jurisdiction::parse(" qc "), Some(Jurisdiction::Quebec));
        assert_eq!(Jurisdiction::parse("fed"), Some(Jurisdiction::Federal));
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(Jurisdiction::parse("XX"), None);
        assert_eq!(Jurisdiction::parse(""), None);
    }

    #[test]
    fn provinces_excludes_federal() {
        assert_eq!(Jurisdiction::provinces().len(), 13);
        assert!(Jurisdiction::provinces().iter().all(|j| !j.is_federal()));
    }

    #[test]
    fn display_uses_code() {
        assert_eq!(Jurisdiction::NovaScotia.to_string(), "NS");
    }
}
