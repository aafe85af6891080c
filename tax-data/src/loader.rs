use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    BracketSegment, BracketTable, BracketTableError, Jurisdiction, TaxTables, TaxYearConfig,
    TaxYearConfigError,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading tax tables.
#[derive(Debug, Error)]
pub enum TableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown jurisdiction code '{0}'")]
    UnknownJurisdiction(String),

    #[error(
        "{jurisdiction} {tax_year}: base credit {found} disagrees with {expected} on an earlier row"
    )]
    InconsistentBaseCredit {
        jurisdiction: Jurisdiction,
        tax_year: i32,
        expected: Decimal,
        found: Decimal,
    },

    #[error("Invalid {jurisdiction} {tax_year} bracket table: {source}")]
    InvalidTable {
        jurisdiction: Jurisdiction,
        tax_year: i32,
        #[source]
        source: BracketTableError,
    },

    #[error("Invalid {tax_year} year parameters: {source}")]
    InvalidYearConfig {
        tax_year: i32,
        #[source]
        source: TaxYearConfigError,
    },
}

impl From<csv::Error> for TableLoaderError {
    fn from(err: csv::Error) -> Self {
        TableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket CSV file.
///
/// - `tax_year`: The tax year (e.g., 2024)
/// - `jurisdiction`: `FED` or a two-letter province/territory code
/// - `lower_bound`: Income at which the segment starts
/// - `upper_bound`: Income at which the segment ends (empty for unbounded)
/// - `rate`: The marginal rate as a decimal (e.g., 0.15 for 15%)
/// - `base_credit`: The jurisdiction's basic personal amount, repeated on
///   every row of the table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub base_credit: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables from CSV files.
///
/// Rows are grouped by (jurisdiction, tax year). Each group becomes one
/// [`BracketTable`] whose base credit rate is the group's lowest-segment
/// rate.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build validated tables from parsed records.
    ///
    /// Segments within a group are ordered by lower bound, so row order in
    /// the file does not matter. Tables are returned ordered by
    /// jurisdiction, then year.
    pub fn build(records: &[BracketRecord]) -> Result<Vec<BracketTable>, TableLoaderError> {
        let mut groups: BTreeMap<(Jurisdiction, i32), Vec<&BracketRecord>> = BTreeMap::new();

        for record in records {
            let jurisdiction = Jurisdiction::parse(&record.jurisdiction)
                .ok_or_else(|| TableLoaderError::UnknownJurisdiction(record.jurisdiction.clone()))?;
            groups
                .entry((jurisdiction, record.tax_year))
                .or_default()
                .push(record);
        }

        let mut tables = Vec::with_capacity(groups.len());
        for ((jurisdiction, tax_year), mut rows) in groups {
            rows.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));

            // Groups are never empty: each was created by pushing a row.
            let first = rows[0];
            if let Some(row) = rows.iter().find(|row| row.base_credit != first.base_credit) {
                return Err(TableLoaderError::InconsistentBaseCredit {
                    jurisdiction,
                    tax_year,
                    expected: first.base_credit,
                    found: row.base_credit,
                });
            }

            let segments = rows
                .iter()
                .map(|row| BracketSegment {
                    lower_bound: row.lower_bound,
                    upper_bound: row.upper_bound,
                    marginal_rate: row.rate,
                })
                .collect();

            let table = BracketTable::new(
                jurisdiction,
                tax_year,
                segments,
                first.base_credit,
                first.rate,
            )
            .map_err(|source| TableLoaderError::InvalidTable {
                jurisdiction,
                tax_year,
                source,
            })?;

            if !table.is_progressive() {
                warn!(%jurisdiction, tax_year, "bracket rates decrease between segments");
            }
            tables.push(table);
        }

        Ok(tables)
    }

    /// Build tables from `records` and register them in `tables`.
    ///
    /// A table already registered for the same jurisdiction and year is
    /// replaced, so loading the same file twice produces the same result.
    /// Returns the number of tables registered.
    pub fn load(
        tables: &mut TaxTables,
        records: &[BracketRecord],
    ) -> Result<usize, TableLoaderError> {
        let built = Self::build(records)?;
        let count = built.len();

        for table in built {
            tables.insert_table(table);
        }

        debug!(count, "loaded bracket tables");
        Ok(count)
    }
}

/// Loader for per-year parameters from CSV files.
///
/// The header row names the [`TaxYearConfig`] fields; there is one row per
/// tax year.
pub struct YearConfigLoader;

impl YearConfigLoader {
    /// Parse year parameter rows from a CSV reader.
    ///
    /// Every row is validated with [`TaxYearConfig::validate`], so a rate
    /// outside `[0, 1]` or a negative threshold fails the whole load.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxYearConfig>, TableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut configs = Vec::new();

        for result in csv_reader.deserialize() {
            let config: TaxYearConfig = result?;
            config
                .validate()
                .map_err(|source| TableLoaderError::InvalidYearConfig {
                    tax_year: config.tax_year,
                    source,
                })?;
            configs.push(config);
        }

        Ok(configs)
    }

    /// Register `configs` in `tables`, replacing any existing year.
    pub fn load(
        tables: &mut TaxTables,
        configs: Vec<TaxYearConfig>,
    ) -> usize {
        let count = configs.len();
        for config in configs {
            tables.insert_year_config(config);
        }

        debug!(count, "loaded year parameters");
        count
    }
}
