use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::{FinancialYear, TaxBracket};

/// Reasons a bracket schedule cannot be used for progressive taxation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketTableError {
    #[error("bracket table for {0} has no brackets")]
    Empty(FinancialYear),

    #[error("first bracket threshold must be 0, found {0}")]
    FirstThresholdNotZero(Decimal),

    #[error("bracket {index} threshold {threshold} does not exceed the previous threshold")]
    NotAscending { index: usize, threshold: Decimal },

    #[error("bracket {index} rate {rate} is outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// A validated progressive tax schedule for one financial year.
///
/// Brackets are sorted ascending by threshold, start at 0 and carry
/// fractional rates. The last bracket is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    financial_year: FinancialYear,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    pub fn new(
        financial_year: FinancialYear,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, BracketTableError> {
        let first = brackets
            .first()
            .ok_or(BracketTableError::Empty(financial_year))?;
        if !first.threshold.is_zero() {
            return Err(BracketTableError::FirstThresholdNotZero(first.threshold));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if index > 0 && bracket.threshold <= brackets[index - 1].threshold {
                return Err(BracketTableError::NotAscending {
                    index,
                    threshold: bracket.threshold,
                });
            }
        }

        Ok(Self {
            financial_year,
            brackets,
        })
    }

    /// Resident rates for 2024-25 (the "Stage 3" schedule).
    pub fn fy_2024_25() -> Self {
        Self {
            financial_year: FinancialYear::new(2024),
            brackets: vec![
                TaxBracket::new(Decimal::ZERO, Decimal::ZERO),
                TaxBracket::new(Decimal::from(18_200), Decimal::new(16, 2)),
                TaxBracket::new(Decimal::from(45_000), Decimal::new(30, 2)),
                TaxBracket::new(Decimal::from(135_000), Decimal::new(37, 2)),
                TaxBracket::new(Decimal::from(190_000), Decimal::new(45, 2)),
            ],
        }
    }

    pub fn financial_year(&self) -> FinancialYear {
        self.financial_year
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Upper bound of bracket `index`, or `None` for the last bracket.
    pub fn upper_bound(
        &self,
        index: usize,
    ) -> Option<Decimal> {
        self.brackets.get(index + 1).map(|b| b.threshold)
    }
}
