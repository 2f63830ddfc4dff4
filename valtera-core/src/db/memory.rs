//! In-process storage backend.
//!
//! Nothing survives the process; useful for tests and for running without a
//! database file.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{CalculatorRepository, RepositoryError};
use crate::models::{BracketTable, FinancialYear};

#[derive(Default)]
struct State {
    tables: BTreeMap<FinancialYear, BracketTable>,
    inputs: HashMap<String, String>,
}

pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    /// An empty repository with no bracket tables.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// A repository holding the reference bracket table.
    pub fn new() -> Self {
        let repo = Self::empty();
        let reference = BracketTable::fy_2024_25();
        if let Ok(mut state) = repo.state.lock() {
            state.tables.insert(reference.financial_year(), reference);
        }
        repo
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::Database(format!("state lock poisoned: {e}")))
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalculatorRepository for MemoryRepository {
    async fn get_bracket_table(
        &self,
        financial_year: FinancialYear,
    ) -> Result<BracketTable, RepositoryError> {
        self.lock()?
            .tables
            .get(&financial_year)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_financial_years(&self) -> Result<Vec<FinancialYear>, RepositoryError> {
        Ok(self.lock()?.tables.keys().rev().copied().collect())
    }

    async fn replace_bracket_tables(
        &self,
        tables: &[BracketTable],
    ) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        for table in tables {
            state.tables.insert(table.financial_year(), table.clone());
        }
        Ok(())
    }

    async fn load_inputs(
        &self,
        key: &str,
    ) -> Result<String, RepositoryError> {
        self.lock()?
            .inputs
            .get(key)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save_inputs(
        &self,
        key: &str,
        blob: &str,
    ) -> Result<(), RepositoryError> {
        self.lock()?
            .inputs
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn CalculatorRepository>, RepositoryError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}
