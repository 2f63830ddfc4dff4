use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculatorForm;
use super::parse::{coerce_decimal, string_or_number};
use crate::FinancialYear;
use crate::calculations::TaxInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxForm {
    /// Financial-year selector, e.g. `2024-25`.
    #[serde(deserialize_with = "string_or_number")]
    pub fy: String,
    #[serde(deserialize_with = "string_or_number")]
    pub salary: String,
    /// Employer super guarantee, percent.
    #[serde(rename = "superPct", deserialize_with = "string_or_number")]
    pub super_pct: String,
    #[serde(rename = "includeMedicare")]
    pub include_medicare: bool,
}

impl Default for TaxForm {
    fn default() -> Self {
        Self {
            fy: FinancialYear::REFERENCE.label(),
            salary: "90000".to_string(),
            super_pct: "11.5".to_string(),
            include_medicare: true,
        }
    }
}

impl CalculatorForm for TaxForm {
    const STORAGE_KEY: &'static str = "valtera-tax-v1";
}

/// Typed tax inputs plus the period whose bracket table applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxRequest {
    pub financial_year: FinancialYear,
    pub input: TaxInput,
}

impl TaxForm {
    /// Reads the fields. Numbers that do not parse count as 0; an
    /// unrecognised period selects the reference year.
    pub fn read(&self) -> TaxRequest {
        let financial_year = FinancialYear::parse(&self.fy).unwrap_or_else(|e| {
            tracing::warn!("{e}, using {}", FinancialYear::REFERENCE);
            FinancialYear::REFERENCE
        });

        TaxRequest {
            financial_year,
            input: TaxInput {
                salary: coerce_decimal("salary", &self.salary),
                include_medicare: self.include_medicare,
                super_percent: coerce_decimal("superPct", &self.super_pct) / Decimal::ONE_HUNDRED,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_read_as_reference_scenario() {
        let request = TaxForm::default().read();

        assert_eq!(request.financial_year, FinancialYear::REFERENCE);
        assert_eq!(request.input.salary, dec!(90000));
        assert_eq!(request.input.super_percent, dec!(0.115));
        assert!(request.input.include_medicare);
    }

    #[test]
    fn invalid_salary_reads_as_zero() {
        let form = TaxForm {
            salary: "ninety".to_string(),
            ..TaxForm::default()
        };

        assert_eq!(form.read().input.salary, Decimal::ZERO);
    }

    #[test]
    fn unknown_period_falls_back_to_reference() {
        let form = TaxForm {
            fy: "next year".to_string(),
            ..TaxForm::default()
        };

        assert_eq!(form.read().financial_year, FinancialYear::REFERENCE);
    }

    #[test]
    fn selector_picks_requested_period() {
        let form = TaxForm {
            fy: "FY2023-24".to_string(),
            ..TaxForm::default()
        };

        assert_eq!(form.read().financial_year, FinancialYear::new(2023));
    }

    #[test]
    fn restores_boolean_flag() {
        let form: TaxForm =
            serde_json::from_str(r#"{"fy":"2024-25","salary":"120000","superPct":"12","includeMedicare":false}"#)
                .unwrap();

        assert!(!form.include_medicare);
        assert_eq!(form.super_pct, "12");
    }

    #[test]
    fn numeric_period_keeps_other_fields() {
        let form: TaxForm =
            serde_json::from_str(r#"{"fy":2024,"salary":"120000","superPct":"12","includeMedicare":false}"#)
                .unwrap();

        assert_eq!(form.fy, "2024");
        assert_eq!(form.salary, "120000");
        assert_eq!(form.read().financial_year, FinancialYear::REFERENCE);
    }

    #[test]
    fn maximal_salary_estimates_without_overflow() {
        let form = TaxForm {
            salary: "79228162514264337593543950335".to_string(),
            super_pct: "200".to_string(),
            ..TaxForm::default()
        };
        let request = form.read();

        let result = crate::calculations::IncomeTaxEstimator::new(&crate::BracketTable::fy_2024_25())
            .calculate(&request.input);

        assert_eq!(result.gross, Decimal::MAX);
        assert_eq!(result.super_employer_contribution, Decimal::MAX);
    }
}
