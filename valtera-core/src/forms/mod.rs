//! Raw form state for each calculator and the readers that turn it into
//! typed calculation inputs.
//!
//! Forms hold field text exactly as entered so it can be persisted and
//! restored verbatim. Defaults mirror the values a fresh form starts with.

mod compound;
mod franking;
pub mod parse;
mod tax;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use compound::CompoundForm;
pub use franking::FrankingForm;
pub use tax::{TaxForm, TaxRequest};

/// A calculator's persisted field set.
pub trait CalculatorForm:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + Send + Sync
{
    /// Namespaced key the form is stored under.
    const STORAGE_KEY: &'static str;
}
