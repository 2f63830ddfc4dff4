use async_trait::async_trait;

use valtera_core::db::repository::{CalculatorRepository, RepositoryError};
use valtera_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// The `"sqlite"` backend.
///
/// `connection_string` is a bare file path (`valtera.db`) or a sqlx URL
/// (`sqlite:valtera.db`, `sqlite::memory:`). A missing file is created,
/// migrated and given the seed tables compiled into this crate, so the
/// binary needs nothing on disk besides the database itself.
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn CalculatorRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        repo.run_builtin_seeds()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        tracing::debug!(database = %config.connection_string, "sqlite storage ready");
        Ok(Box::new(repo))
    }
}
