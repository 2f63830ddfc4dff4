use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Currency symbols, thousands separators, percent signs and whitespace are
/// decoration, not part of the number.
static DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,$%]").expect("static pattern compiles"));

/// Error returned when a field cannot be parsed as a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number '{input}'")]
pub struct ParseNumberError {
    pub input: String,
}

/// Strips decoration so `"$1,234.50"` and `" 7 % "` parse as plain numbers.
pub fn normalize_number_input(s: &str) -> String {
    DECORATION.replace_all(s, "").into_owned()
}

/// Parses a field into a [`Decimal`]. Empty input is 0.
///
/// Accepts plain and scientific notation (`1e5`).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseNumberError> {
    parse_optional_decimal(s).map(|value| value.unwrap_or(Decimal::ZERO))
}

/// Parses a field into an optional [`Decimal`]. Empty input is `None`;
/// anything else must be a number.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseNumberError> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map(Some)
        .map_err(|_| ParseNumberError {
            input: s.to_string(),
        })
}

/// Parses a field as [`Decimal`], falling back to 0 for anything invalid.
pub fn coerce_decimal(
    field: &str,
    s: &str,
) -> Decimal {
    parse_decimal(s).unwrap_or_else(|e| {
        tracing::debug!(field, input = %s, "{e}, using 0");
        Decimal::ZERO
    })
}

/// Parses a field as `f64`, falling back to 0 for empty, invalid or
/// non-finite input.
pub fn coerce_f64(
    field: &str,
    s: &str,
) -> f64 {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        return 0.0;
    }
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!(field, input = %s, "invalid number, using 0");
            0.0
        }
    }
}

/// Accepts a JSON string or number and keeps it as the raw field text.
///
/// Older blobs stored field values as numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_strips_currency_and_percent() {
        assert_eq!(parse_decimal("$90,000").unwrap(), dec!(90000));
        assert_eq!(parse_decimal(" 11.5 % ").unwrap(), dec!(11.5));
    }

    #[test]
    fn parse_decimal_accepts_scientific_notation() {
        assert_eq!(parse_decimal("1e5").unwrap(), dec!(100000));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert_eq!(
            parse_decimal("abc"),
            Err(ParseNumberError {
                input: "abc".to_string()
            })
        );
    }

    #[test]
    fn parse_optional_decimal_distinguishes_empty_from_invalid() {
        assert_eq!(parse_optional_decimal(""), Ok(None));
        assert_eq!(parse_optional_decimal("0"), Ok(Some(dec!(0))));
        assert!(parse_optional_decimal("zero").is_err());
    }

    #[test]
    fn coerce_decimal_falls_back_to_zero() {
        assert_eq!(coerce_decimal("salary", "lots"), Decimal::ZERO);
        assert_eq!(coerce_decimal("salary", "90000"), dec!(90000));
    }

    #[test]
    fn coerce_f64_falls_back_to_zero() {
        assert_eq!(coerce_f64("initial", ""), 0.0);
        assert_eq!(coerce_f64("initial", "abc"), 0.0);
        assert_eq!(coerce_f64("initial", "inf"), 0.0);
        assert_eq!(coerce_f64("initial", "NaN"), 0.0);
        assert_eq!(coerce_f64("initial", "-2.5"), -2.5);
        assert_eq!(coerce_f64("initial", "$5,000"), 5000.0);
    }
}
