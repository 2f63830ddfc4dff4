//! Best-effort persistence of calculator forms.
//!
//! Each form is stored as a JSON object under its [`CalculatorForm::STORAGE_KEY`].
//! Loading reports why nothing usable was found; saving never fails from the
//! caller's point of view.

use thiserror::Error;

use crate::db::repository::{CalculatorRepository, RepositoryError};
use crate::forms::CalculatorForm;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no saved inputs under '{0}'")]
    NotFound(String),

    #[error("saved inputs under '{key}' are corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("storage unavailable: {0}")]
    Unavailable(#[from] RepositoryError),
}

/// Loads the last saved field values for `F`.
///
/// # Errors
///
/// * [`PersistError::NotFound`]: nothing has been saved yet.
/// * [`PersistError::Corrupt`]: the stored blob is not a valid form.
/// * [`PersistError::Unavailable`]: the storage backend failed.
pub async fn load_persisted<F: CalculatorForm>(
    repo: &dyn CalculatorRepository
) -> Result<F, PersistError> {
    let blob = match repo.load_inputs(F::STORAGE_KEY).await {
        Ok(blob) => blob,
        Err(RepositoryError::NotFound) => {
            return Err(PersistError::NotFound(F::STORAGE_KEY.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&blob).map_err(|e| PersistError::Corrupt {
        key: F::STORAGE_KEY.to_string(),
        reason: e.to_string(),
    })
}

/// Loads the saved form, falling back to the defaults on any failure.
pub async fn load_or_default<F: CalculatorForm>(repo: &dyn CalculatorRepository) -> F {
    match load_persisted::<F>(repo).await {
        Ok(form) => form,
        Err(PersistError::NotFound(key)) => {
            tracing::debug!(key, "no saved inputs, using defaults");
            F::default()
        }
        Err(e) => {
            tracing::warn!("{e}; using defaults");
            F::default()
        }
    }
}

/// Saves the form. Failures are logged and otherwise ignored.
pub async fn save_persisted<F: CalculatorForm>(
    repo: &dyn CalculatorRepository,
    form: &F,
) {
    let blob = match serde_json::to_string(form) {
        Ok(blob) => blob,
        Err(e) => {
            tracing::warn!(key = F::STORAGE_KEY, "could not serialize inputs: {e}");
            return;
        }
    };

    if let Err(e) = repo.save_inputs(F::STORAGE_KEY, &blob).await {
        tracing::warn!(key = F::STORAGE_KEY, "could not save inputs: {e}");
    }
}
