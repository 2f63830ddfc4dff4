use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculatorForm;
use super::parse::{parse_optional_decimal, string_or_number};
use crate::calculations::{FrankingError, FrankingInput};

/// Franking fields. Rates are entered as percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrankingForm {
    #[serde(deserialize_with = "string_or_number")]
    pub dividend: String,
    #[serde(rename = "frankingPct", deserialize_with = "string_or_number")]
    pub franking_pct: String,
    /// Company tax rate, percent.
    #[serde(rename = "taxRate", deserialize_with = "string_or_number")]
    pub tax_rate: String,
    /// Shareholder marginal rate, percent. Empty means not supplied.
    #[serde(rename = "personalRate", deserialize_with = "string_or_number")]
    pub personal_rate: String,
}

impl Default for FrankingForm {
    fn default() -> Self {
        Self {
            dividend: String::new(),
            franking_pct: "100".to_string(),
            tax_rate: "30".to_string(),
            personal_rate: String::new(),
        }
    }
}

impl CalculatorForm for FrankingForm {
    const STORAGE_KEY: &'static str = "valtera-franking-v1";
}

fn required(
    field: &'static str,
    raw: &str,
) -> Result<Decimal, FrankingError> {
    optional(field, raw)?.ok_or(FrankingError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn optional(
    field: &'static str,
    raw: &str,
) -> Result<Option<Decimal>, FrankingError> {
    parse_optional_decimal(raw).map_err(|e| FrankingError::InvalidNumber {
        field,
        value: e.input,
    })
}

impl FrankingForm {
    /// Reads the fields, converting percentage rates to fractions.
    ///
    /// Unlike the other calculators nothing is coerced: empty required
    /// fields and non-numeric text are errors. Only an empty personal rate
    /// is accepted, as "not supplied".
    pub fn read(&self) -> Result<FrankingInput, FrankingError> {
        let dividend = required("dividend", &self.dividend)?;
        let franking_percent = required("frankingPct", &self.franking_pct)?;
        let company_rate = required("taxRate", &self.tax_rate)? / Decimal::ONE_HUNDRED;
        let personal_rate =
            optional("personalRate", &self.personal_rate)?.map(|rate| rate / Decimal::ONE_HUNDRED);

        Ok(FrankingInput {
            dividend,
            franking_percent,
            company_rate,
            personal_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn form(
        dividend: &str,
        franking_pct: &str,
        tax_rate: &str,
        personal_rate: &str,
    ) -> FrankingForm {
        FrankingForm {
            dividend: dividend.to_string(),
            franking_pct: franking_pct.to_string(),
            tax_rate: tax_rate.to_string(),
            personal_rate: personal_rate.to_string(),
        }
    }

    #[test]
    fn reads_percentages_as_fractions() {
        let input = form("1000", "100", "30", "32.5").read().unwrap();

        assert_eq!(input.dividend, dec!(1000));
        assert_eq!(input.franking_percent, dec!(100));
        assert_eq!(input.company_rate, dec!(0.30));
        assert_eq!(input.personal_rate, Some(dec!(0.325)));
    }

    #[test]
    fn empty_personal_rate_is_not_supplied() {
        let input = form("1000", "100", "30", "").read().unwrap();

        assert_eq!(input.personal_rate, None);
    }

    #[test]
    fn zero_personal_rate_is_supplied() {
        let input = form("1000", "100", "30", "0").read().unwrap();

        assert_eq!(input.personal_rate, Some(dec!(0)));
    }

    #[test]
    fn non_numeric_personal_rate_is_invalid() {
        let result = form("1000", "100", "30", "high").read();

        assert_eq!(
            result,
            Err(FrankingError::InvalidNumber {
                field: "personalRate",
                value: "high".to_string(),
            })
        );
    }

    #[test]
    fn empty_dividend_is_invalid() {
        let result = FrankingForm::default().read();

        assert!(matches!(
            result,
            Err(FrankingError::InvalidNumber {
                field: "dividend",
                ..
            })
        ));
    }

    #[test]
    fn huge_dividend_reads_but_cannot_be_grossed_up() {
        let input = form("70000000000000000000000000000", "100", "99", "")
            .read()
            .unwrap();

        assert!(matches!(
            crate::calculations::FrankingCalculator::calculate(&input),
            Err(FrankingError::Overflow(_))
        ));
    }

    #[test]
    fn restores_from_blob() {
        let form: FrankingForm =
            serde_json::from_str(r#"{"dividend":"850","frankingPct":"50","taxRate":"25","personalRate":""}"#)
                .unwrap();

        assert_eq!(form.dividend, "850");
        assert_eq!(form.franking_pct, "50");
        assert_eq!(form.tax_rate, "25");
        assert_eq!(form.personal_rate, "");
    }
}
