use std::collections::{BTreeSet, HashMap};

use thiserror::Error;
use tracing::debug;

use crate::models::{BracketTable, Jurisdiction, TaxYearConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no {jurisdiction} bracket table for {tax_year}; available years: {available:?}")]
    TableNotFound {
        jurisdiction: Jurisdiction,
        tax_year: i32,
        available: Vec<i32>,
    },

    #[error("no parameters for tax year {tax_year}; available years: {available:?}")]
    YearNotFound { tax_year: i32, available: Vec<i32> },
}

/// Read-only lookup of published bracket tables and yearly parameters.
///
/// Typical lifetime:
/// 1. Create with `TaxTables::new()`.
/// 2. Insert every table and year config once at startup.
/// 3. Share `&TaxTables` with every calculation; nothing mutates it after.
#[derive(Debug, Clone, Default)]
pub struct TaxTables {
    tables: HashMap<(Jurisdiction, i32), BracketTable>,
    year_configs: HashMap<i32, TaxYearConfig>,
}

impl TaxTables {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bracket table.
    ///
    /// A table already present for the same jurisdiction and year is
    /// silently replaced.
    pub fn insert_table(
        &mut self,
        table: BracketTable,
    ) {
        debug!(
            jurisdiction = %table.jurisdiction(),
            tax_year = table.tax_year(),
            segments = table.segments().len(),
            "registering bracket table"
        );
        self.tables
            .insert((table.jurisdiction(), table.tax_year()), table);
    }

    /// Register the parameters for a year, replacing any previous entry.
    pub fn insert_year_config(
        &mut self,
        config: TaxYearConfig,
    ) {
        self.year_configs.insert(config.tax_year, config);
    }

    /// Bracket table for `jurisdiction` in `tax_year`.
    ///
    /// # Errors
    /// [`TableError::TableNotFound`] naming the years that do have tables.
    pub fn table(
        &self,
        jurisdiction: Jurisdiction,
        tax_year: i32,
    ) -> Result<&BracketTable, TableError> {
        self.tables
            .get(&(jurisdiction, tax_year))
            .ok_or_else(|| TableError::TableNotFound {
                jurisdiction,
                tax_year,
                available: self.available_years(),
            })
    }

    /// Parameters for `tax_year`.
    ///
    /// # Errors
    /// [`TableError::YearNotFound`] naming the years that do have parameters.
    pub fn year_config(
        &self,
        tax_year: i32,
    ) -> Result<&TaxYearConfig, TableError> {
        self.year_configs
            .get(&tax_year)
            .ok_or_else(|| TableError::YearNotFound {
                tax_year,
                available: sorted_years(self.year_configs.keys().copied()),
            })
    }

    /// Years with at least one bracket table, ascending.
    pub fn available_years(&self) -> Vec<i32> {
        sorted_years(self.tables.keys().map(|(_, year)| *year))
    }

    /// Jurisdictions with a table for `tax_year`, in enum order.
    pub fn jurisdictions_for(
        &self,
        tax_year: i32,
    ) -> Vec<Jurisdiction> {
        let mut found: Vec<_> = self
            .tables
            .keys()
            .filter(|(_, year)| *year == tax_year)
            .map(|(jurisdiction, _)| *jurisdiction)
            .collect();
        found.sort_unstable();
        found
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

fn sorted_years(years: impl Iterator<Item = i32>) -> Vec<i32> {
    years.collect::<BTreeSet<_>>().into_iter().collect()
}
