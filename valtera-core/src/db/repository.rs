use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BracketTable, FinancialYear};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait CalculatorRepository: Send + Sync {
    // Bracket tables
    async fn get_bracket_table(
        &self,
        financial_year: FinancialYear,
    ) -> Result<BracketTable, RepositoryError>;

    /// Periods that have a bracket table, newest first.
    async fn list_financial_years(&self) -> Result<Vec<FinancialYear>, RepositoryError>;

    /// Stores `table`, discarding any existing brackets for its period.
    async fn replace_bracket_table(
        &self,
        table: &BracketTable,
    ) -> Result<(), RepositoryError> {
        self.replace_bracket_tables(std::slice::from_ref(table))
            .await
    }

    /// Stores every table in `tables` as one unit: either all periods are
    /// replaced or none are.
    async fn replace_bracket_tables(
        &self,
        tables: &[BracketTable],
    ) -> Result<(), RepositoryError>;

    // Persisted form inputs
    async fn load_inputs(
        &self,
        key: &str,
    ) -> Result<String, RepositoryError>;

    async fn save_inputs(
        &self,
        key: &str,
        blob: &str,
    ) -> Result<(), RepositoryError>;
}
