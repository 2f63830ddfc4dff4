use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use valtera_core::{
    BracketTable, BracketTableError, CalculatorRepository, FinancialYear, FinancialYearError,
    RepositoryError, TaxBracket,
};

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: {source}")]
    InvalidFinancialYear {
        row: usize,
        #[source]
        source: FinancialYearError,
    },

    #[error("invalid schedule for {financial_year}: {source}")]
    InvalidTable {
        financial_year: FinancialYear,
        #[source]
        source: BracketTableError,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket CSV file.
///
/// - `financial_year`: the period label (e.g. `2024-25`)
/// - `threshold`: income at which the bracket starts
/// - `rate`: the marginal rate as a fraction (e.g. 0.16 for 16%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub financial_year: String,
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Loader for bracket tables from CSV files.
///
/// Reads CSV data and stores it through the [`CalculatorRepository`] trait,
/// so it works with any storage backend.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by financial year into validated tables.
    ///
    /// Rows within a year may appear in any order; they are sorted by
    /// threshold before validation. Tables are returned oldest first.
    pub fn tables(records: &[BracketRecord]) -> Result<Vec<BracketTable>, BracketLoaderError> {
        let mut groups: BTreeMap<FinancialYear, Vec<TaxBracket>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let financial_year = FinancialYear::parse(&record.financial_year).map_err(|source| {
                BracketLoaderError::InvalidFinancialYear {
                    row: idx + 1, // 1-based, header excluded
                    source,
                }
            })?;
            groups
                .entry(financial_year)
                .or_default()
                .push(TaxBracket::new(record.threshold, record.rate));
        }

        groups
            .into_iter()
            .map(|(financial_year, mut brackets)| {
                brackets.sort_by(|a, b| a.threshold.cmp(&b.threshold));
                BracketTable::new(financial_year, brackets).map_err(|source| {
                    BracketLoaderError::InvalidTable {
                        financial_year,
                        source,
                    }
                })
            })
            .collect()
    }

    /// Load bracket records into the repository.
    ///
    /// Every table is validated before anything is written, then all
    /// financial years are replaced in a single repository call, so a
    /// storage failure leaves every stored table as it was. Loading the
    /// same file twice gives the same result.
    ///
    /// Returns the number of brackets written.
    pub async fn load<R: CalculatorRepository + ?Sized>(
        repo: &R,
        records: &[BracketRecord],
    ) -> Result<usize, BracketLoaderError> {
        let tables = Self::tables(records)?;
        repo.replace_bracket_tables(&tables).await?;

        for table in &tables {
            tracing::debug!(
                financial_year = %table.financial_year(),
                brackets = table.brackets().len(),
                "loaded bracket table"
            );
        }

        Ok(tables.iter().map(|t| t.brackets().len()).sum())
    }
}
