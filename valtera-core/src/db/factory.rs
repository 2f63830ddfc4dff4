//! Backend selection by name.
//!
//! Storage crates register a [`RepositoryFactory`]; the binary picks one
//! through [`DbConfig::backend`] without depending on the backend types.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::repository::{CalculatorRepository, RepositoryError};

/// Which backend to open and how to reach it.
///
/// | backend  | connection_string                 |
/// |----------|-----------------------------------|
/// | `sqlite` | `valtera.db`, `sqlite::memory:`   |
/// | `memory` | ignored                           |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    /// Handed to the factory as is.
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "valtera.db".to_string(),
        }
    }
}

#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Opens storage, creating it if needed. The returned repository already
    /// holds the reference bracket table.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn CalculatorRepository>, RepositoryError>;
}

/// Factories keyed by [`RepositoryFactory::backend_name`].
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`, replacing one registered under the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the backend named by `config.backend`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Configuration`] when the name is not registered,
    /// otherwise whatever the factory reports.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn CalculatorRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(backend = factory.backend_name(), "opening repository");
        factory.create(config).await
    }
}
