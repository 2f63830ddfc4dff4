//! Pure compute functions for the three calculators.
//!
//! Each function maps validated inputs to a freshly built result record;
//! nothing here performs I/O or keeps state between calls.

pub mod common;
pub mod compound;
pub mod franking;
pub mod income_tax;

pub use compound::{CompoundInput, CompoundResult, MAX_MONTHS, simulate};
pub use franking::{AfterTax, FrankingCalculator, FrankingError, FrankingInput, FrankingResult};
pub use income_tax::{IncomeTaxEstimator, MEDICARE_LEVY_RATE, TaxInput, TaxResult, income_tax};
