use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid financial year '{0}' (expected e.g. 2024-25 or FY2024-25)")]
pub struct FinancialYearError(pub String);

/// An Australian financial year, 1 July `start_year` to 30 June the year after.
///
/// Displayed and stored as `YYYY-YY`, e.g. `2024-25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    /// The period whose bracket table ships with every backend.
    pub const REFERENCE: FinancialYear = FinancialYear { start_year: 2024 };

    pub const fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + 1
    }

    /// Parses `2024-25`, `FY2024-25`, `fy24-25` or `2024-2025`.
    pub fn parse(s: &str) -> Result<Self, FinancialYearError> {
        let err = || FinancialYearError(s.to_string());
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("FY")
            .or_else(|| trimmed.strip_prefix("fy"))
            .unwrap_or(trimmed)
            .trim();

        let (start, end) = body.split_once('-').ok_or_else(err)?;
        if start.is_empty() || end.is_empty() {
            return Err(err());
        }
        let start_year = match start.len() {
            4 => start.parse::<i32>().map_err(|_| err())?,
            2 => 2000 + start.parse::<i32>().map_err(|_| err())?,
            _ => return Err(err()),
        };
        let end_year = match end.len() {
            4 => end.parse::<i32>().map_err(|_| err())?,
            2 => {
                let yy = end.parse::<i32>().map_err(|_| err())?;
                // Century rolls over for 1999-00 style labels.
                let century = (start_year + 1) / 100 * 100;
                century + yy
            }
            _ => return Err(err()),
        };

        if end_year != start_year + 1 {
            return Err(err());
        }
        Ok(Self { start_year })
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, self.end_year() % 100)
    }
}

impl Default for FinancialYear {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = FinancialYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FinancialYear> for String {
    fn from(value: FinancialYear) -> Self {
        value.label()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_short_label() {
        assert_eq!(FinancialYear::parse("2024-25"), Ok(FinancialYear::new(2024)));
    }

    #[test]
    fn parse_accepts_fy_prefix_and_two_digit_start() {
        assert_eq!(FinancialYear::parse("FY2024-25"), Ok(FinancialYear::new(2024)));
        assert_eq!(FinancialYear::parse("fy24-25"), Ok(FinancialYear::new(2024)));
    }

    #[test]
    fn parse_accepts_four_digit_end() {
        assert_eq!(FinancialYear::parse("2023-2024"), Ok(FinancialYear::new(2023)));
    }

    #[test]
    fn parse_handles_century_rollover() {
        assert_eq!(FinancialYear::parse("1999-00"), Ok(FinancialYear::new(1999)));
    }

    #[test]
    fn parse_rejects_non_consecutive_years() {
        assert!(FinancialYear::parse("2024-26").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(FinancialYear::parse("").is_err());
        assert!(FinancialYear::parse("2024").is_err());
        assert!(FinancialYear::parse("abcd-ef").is_err());
    }

    #[test]
    fn label_round_trips() {
        let fy = FinancialYear::new(2024);

        assert_eq!(fy.label(), "2024-25");
        assert_eq!(FinancialYear::parse(&fy.label()), Ok(fy));
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&FinancialYear::REFERENCE).unwrap();

        assert_eq!(json, "\"2024-25\"");
        assert_eq!(
            serde_json::from_str::<FinancialYear>(&json).unwrap(),
            FinancialYear::REFERENCE
        );
    }
}
