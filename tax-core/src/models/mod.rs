mod bracket_table;
mod income_tax;
mod indexed_bracket_table;
mod jurisdiction;
mod jurisdiction_adjustment;
mod tax_result;
mod tax_year_config;

pub use bracket_table::{BracketSegment, BracketTable, BracketTableError};
pub use income_tax::{IncomeTaxRequest, IncomeTaxSummary};
pub use indexed_bracket_table::IndexedBracketTable;
pub use jurisdiction::Jurisdiction;
pub use jurisdiction_adjustment::{JurisdictionAdjustment, QUEBEC_ABATEMENT_RATE};
pub use tax_result::TaxResult;
pub use tax_year_config::{TaxYearConfig, TaxYearConfigError};
