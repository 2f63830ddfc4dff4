use serde::{Deserialize, Serialize};

use super::CalculatorForm;
use super::parse::{coerce_f64, string_or_number};
use crate::calculations::CompoundInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundForm {
    #[serde(deserialize_with = "string_or_number")]
    pub initial: String,
    #[serde(deserialize_with = "string_or_number")]
    pub monthly: String,
    #[serde(deserialize_with = "string_or_number")]
    pub years: String,
    /// Expected annual return, percent.
    #[serde(rename = "return", deserialize_with = "string_or_number")]
    pub annual_return: String,
    /// Expected annual inflation, percent.
    #[serde(deserialize_with = "string_or_number")]
    pub inflation: String,
}

impl Default for CompoundForm {
    fn default() -> Self {
        Self {
            initial: "5000".to_string(),
            monthly: "500".to_string(),
            years: "10".to_string(),
            annual_return: "7".to_string(),
            inflation: "3".to_string(),
        }
    }
}

impl CalculatorForm for CompoundForm {
    const STORAGE_KEY: &'static str = "valtera-compound-v1";
}

impl CompoundForm {
    /// Reads the fields; anything empty or non-numeric counts as 0.
    pub fn read(&self) -> CompoundInput {
        CompoundInput {
            initial: coerce_f64("initial", &self.initial),
            monthly_contribution: coerce_f64("monthly", &self.monthly),
            years: coerce_f64("years", &self.years),
            annual_return_percent: coerce_f64("return", &self.annual_return),
            inflation_percent: coerce_f64("inflation", &self.inflation),
        }
    }
}
