//! Table data for the tax engine: CSV loaders and the embedded 2024 tables.

mod loader;

use std::io::Read;

use tax_core::TaxTables;

pub use loader::{BracketRecord, BracketTableLoader, TableLoaderError, YearConfigLoader};

/// Published 2024 federal, provincial and territorial brackets.
pub const BRACKETS_2024_CSV: &str = include_str!("../data/brackets_2024.csv");

/// Published 2024 payroll, OAS, dividend and registered plan parameters.
pub const YEAR_CONFIG_2024_CSV: &str = include_str!("../data/year_config_2024.csv");

/// Builds a registry from a bracket CSV and a year parameter CSV.
pub fn load_tables<B: Read, Y: Read>(
    brackets: B,
    year_config: Y,
) -> Result<TaxTables, TableLoaderError> {
    let mut tables = TaxTables::new();

    let records = BracketTableLoader::parse(brackets)?;
    BracketTableLoader::load(&mut tables, &records)?;
    YearConfigLoader::load(&mut tables, YearConfigLoader::parse(year_config)?);

    Ok(tables)
}

/// Registry holding the embedded tables.
pub fn default_tables() -> Result<TaxTables, TableLoaderError> {
    load_tables(BRACKETS_2024_CSV.as_bytes(), YEAR_CONFIG_2024_CSV.as_bytes())
}
