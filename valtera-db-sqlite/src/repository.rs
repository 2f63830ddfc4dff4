use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use valtera_core::{BracketTable, CalculatorRepository, FinancialYear, RepositoryError, TaxBracket};

use crate::decimal::get_decimal;

/// Seed files embedded at build time, in the order they are applied.
const BUILTIN_SEEDS: &[(&str, &str)] = &[(
    "0001_brackets_2024_25.sql",
    include_str!("../seeds/0001_brackets_2024_25.sql"),
)];

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connects to `database_url`, creating the database file if missing.
    ///
    /// Accepts sqlx URLs (`sqlite:valtera.db`, `sqlite::memory:`) as well as
    /// bare file paths.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Applies the seed files compiled into this crate. Seeds only insert
    /// missing rows, so running them again leaves loaded tables alone.
    pub async fn run_builtin_seeds(&self) -> Result<()> {
        for (name, sql) in BUILTIN_SEEDS {
            self.apply_seed(name, sql).await?;
        }
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;
            self.apply_seed(&path.display().to_string(), &sql).await?;
        }

        Ok(())
    }

    async fn apply_seed(
        &self,
        name: &str,
        sql: &str,
    ) -> Result<()> {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to execute seed '{name}'"))?;
        tracing::debug!(seed = name, "seed applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_financial_year(s: &str) -> Result<FinancialYear, RepositoryError> {
    FinancialYear::parse(s).map_err(|e| RepositoryError::Database(e.to_string()))
}

#[async_trait]
impl CalculatorRepository for SqliteRepository {
    async fn get_bracket_table(
        &self,
        financial_year: FinancialYear,
    ) -> Result<BracketTable, RepositoryError> {
        let rows = sqlx::query(
            "SELECT threshold, rate FROM tax_bracket
             WHERE financial_year = ? ORDER BY position",
        )
        .bind(financial_year.label())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if rows.is_empty() {
            return Err(RepositoryError::NotFound);
        }

        let brackets = rows
            .iter()
            .map(|row| {
                Ok(TaxBracket {
                    threshold: get_decimal(row, "threshold")?,
                    rate: get_decimal(row, "rate")?,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        BracketTable::new(financial_year, brackets).map_err(|e| {
            RepositoryError::Database(format!("Stored brackets for {financial_year} are invalid: {e}"))
        })
    }

    async fn list_financial_years(&self) -> Result<Vec<FinancialYear>, RepositoryError> {
        let rows = sqlx::query("SELECT DISTINCT financial_year FROM tax_bracket")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut years = rows
            .iter()
            .map(|row| {
                let label: String = row
                    .try_get("financial_year")
                    .map_err(|e| RepositoryError::Database(e.to_string()))?;
                parse_financial_year(&label)
            })
            .collect::<Result<Vec<_>, _>>()?;

        years.sort_unstable_by(|a, b| b.cmp(a));
        Ok(years)
    }

    async fn replace_bracket_tables(
        &self,
        tables: &[BracketTable],
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        for table in tables {
            let label = table.financial_year().label();
            sqlx::query("DELETE FROM tax_bracket WHERE financial_year = ?")
                .bind(&label)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

            for (position, bracket) in table.brackets().iter().enumerate() {
                sqlx::query(
                    "INSERT INTO tax_bracket (financial_year, position, threshold, rate)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(&label)
                .bind(position as i64)
                .bind(bracket.threshold.to_string())
                .bind(bracket.rate.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            }
        }

        // dropping `tx` on an early return rolls every table back
        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        for table in tables {
            tracing::info!(
                financial_year = %table.financial_year(),
                brackets = table.brackets().len(),
                "bracket table stored"
            );
        }
        Ok(())
    }

    async fn load_inputs(
        &self,
        key: &str,
    ) -> Result<String, RepositoryError> {
        let row = sqlx::query("SELECT blob FROM persisted_inputs WHERE storage_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row.try_get("blob")
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    async fn save_inputs(
        &self,
        key: &str,
        blob: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO persisted_inputs (storage_key, blob, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(storage_key) DO UPDATE SET
                 blob = excluded.blob,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(blob)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}
