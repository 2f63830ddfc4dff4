//! Franking credit and grossed-up dividend calculations.
//!
//! A franked dividend carries a credit for company tax already paid. The
//! credit for a fully franked dividend is `dividend * rate / (1 - rate)`,
//! which grosses the cash dividend back up to its pre-company-tax amount.
//! Partly franked dividends carry that credit scaled by the franking
//! percentage.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use valtera_core::calculations::{FrankingCalculator, FrankingInput};
//!
//! let result = FrankingCalculator::calculate(&FrankingInput {
//!     dividend: dec!(700),
//!     franking_percent: dec!(100),
//!     company_rate: dec!(0.30),
//!     personal_rate: Some(dec!(0.45)),
//! })
//! .unwrap();
//!
//! assert_eq!(result.credit, dec!(300));
//! assert_eq!(result.grossed_up, dec!(1000));
//! assert_eq!(result.after_tax.unwrap().after_tax, dec!(550));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Reasons franking inputs are rejected. Any of these means no result is
/// produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrankingError {
    /// A field held something that is not a number.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("dividend must be greater than zero, got {0}")]
    NonPositiveDividend(Decimal),

    #[error("franking percentage must be between 0 and 100, got {0}")]
    FrankingPercentOutOfRange(Decimal),

    #[error("company tax rate must be strictly between 0 and 1, got {0}")]
    CompanyRateOutOfRange(Decimal),

    #[error("personal marginal rate must be at least 0 and below 1, got {0}")]
    PersonalRateOutOfRange(Decimal),

    /// The amounts are valid but the result does not fit in a `Decimal`.
    #[error("dividend of {0} is too large to gross up")]
    Overflow(Decimal),
}

/// Inputs to the franking calculation. Rates are fractions; the franking
/// level is a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrankingInput {
    pub dividend: Decimal,
    /// Portion of the dividend that is franked, 0 to 100.
    pub franking_percent: Decimal,
    /// Company tax rate the credit was generated under.
    pub company_rate: Decimal,
    /// Shareholder's marginal rate, `None` when not supplied.
    pub personal_rate: Option<Decimal>,
}

/// After-tax outcome at the shareholder's marginal rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterTax {
    pub personal_rate: Decimal,
    pub personal_tax: Decimal,
    pub after_tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrankingResult {
    pub dividend: Decimal,
    pub franking_percent: Decimal,
    pub company_rate: Decimal,
    pub credit: Decimal,
    pub grossed_up: Decimal,
    pub after_tax: Option<AfterTax>,
}

pub struct FrankingCalculator;

impl FrankingCalculator {
    /// Checks every domain rule, returning the first violation.
    pub fn validate(input: &FrankingInput) -> Result<(), FrankingError> {
        if input.dividend <= Decimal::ZERO {
            return Err(FrankingError::NonPositiveDividend(input.dividend));
        }
        if input.franking_percent < Decimal::ZERO || input.franking_percent > ONE_HUNDRED {
            return Err(FrankingError::FrankingPercentOutOfRange(
                input.franking_percent,
            ));
        }
        if input.company_rate <= Decimal::ZERO || input.company_rate >= Decimal::ONE {
            return Err(FrankingError::CompanyRateOutOfRange(input.company_rate));
        }
        if let Some(rate) = input.personal_rate {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(FrankingError::PersonalRateOutOfRange(rate));
            }
        }
        Ok(())
    }

    /// Credit attached to a fully franked dividend of this size, `None`
    /// when it is too large to represent.
    pub fn full_credit(
        dividend: Decimal,
        company_rate: Decimal,
    ) -> Option<Decimal> {
        dividend
            .checked_mul(company_rate)?
            .checked_div(Decimal::ONE - company_rate)
    }

    fn credit_and_gross(input: &FrankingInput) -> Option<(Decimal, Decimal)> {
        let credit = Self::full_credit(input.dividend, input.company_rate)?
            .checked_mul(input.franking_percent / ONE_HUNDRED)?;
        Some((credit, input.dividend.checked_add(credit)?))
    }

    /// Validates the input and computes the credit, grossed-up amount and,
    /// when a personal rate is given, the after-tax outcome.
    ///
    /// # Errors
    ///
    /// Returns the first [`FrankingError`] rule the input violates, or
    /// [`FrankingError::Overflow`] when the grossed-up amount cannot be
    /// represented.
    pub fn calculate(input: &FrankingInput) -> Result<FrankingResult, FrankingError> {
        Self::validate(input)?;

        let (credit, grossed_up) =
            Self::credit_and_gross(input).ok_or(FrankingError::Overflow(input.dividend))?;

        let after_tax = match input.personal_rate {
            Some(personal_rate) => {
                let personal_tax = grossed_up
                    .checked_mul(personal_rate)
                    .ok_or(FrankingError::Overflow(input.dividend))?;
                Some(AfterTax {
                    personal_rate,
                    personal_tax,
                    after_tax: grossed_up - personal_tax,
                })
            }
            None => None,
        };

        tracing::debug!(
            dividend = %input.dividend,
            credit = %credit,
            grossed_up = %grossed_up,
            "franking calculated"
        );

        Ok(FrankingResult {
            dividend: input.dividend,
            franking_percent: input.franking_percent,
            company_rate: input.company_rate,
            credit,
            grossed_up,
            after_tax,
        })
    }
}
