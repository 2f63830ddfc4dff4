//! Progressive income tax estimate with an approximate Medicare levy and
//! employer superannuation.
//!
//! Income is split across the brackets of a [`BracketTable`]; each slice is
//! taxed at its bracket's marginal rate. The Medicare levy is a flat 2% of
//! gross income (the real low-income phase-in and surcharge are not modelled).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use valtera_core::BracketTable;
//! use valtera_core::calculations::{IncomeTaxEstimator, TaxInput};
//!
//! let table = BracketTable::fy_2024_25();
//! let result = IncomeTaxEstimator::new(&table).calculate(&TaxInput {
//!     salary: dec!(90000),
//!     include_medicare: true,
//!     super_percent: dec!(0.115),
//! });
//!
//! assert_eq!(result.tax, dec!(17788));
//! assert_eq!(result.medicare, dec!(1800));
//! assert_eq!(result.net, dec!(70412));
//! assert_eq!(result.super_employer_contribution, dec!(10350));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BracketTable;
use crate::calculations::common::{max, min, round_whole};

/// Flat Medicare levy approximation (2%).
pub const MEDICARE_LEVY_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Income tax on `amount` under `table`, rounded to whole dollars and never
/// negative. Medicare is not included.
pub fn income_tax(
    amount: Decimal,
    table: &BracketTable,
) -> Decimal {
    let mut tax = Decimal::ZERO;
    for (index, bracket) in table.brackets().iter().enumerate() {
        if amount <= bracket.threshold {
            break;
        }
        let top = match table.upper_bound(index) {
            Some(end) => min(amount, end),
            None => amount,
        };
        tax += (top - bracket.threshold) * bracket.rate;
    }
    max(round_whole(tax), Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross annual salary.
    pub salary: Decimal,
    pub include_medicare: bool,
    /// Employer super guarantee as a fraction (0.115 for 11.5%).
    pub super_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross: Decimal,
    pub tax: Decimal,
    pub medicare: Decimal,
    pub net: Decimal,
    pub super_employer_contribution: Decimal,
    /// `(tax + medicare) / gross`; `None` when gross income is zero.
    pub effective_rate: Option<Decimal>,
}

/// Estimator bound to one financial year's schedule.
#[derive(Debug, Clone)]
pub struct IncomeTaxEstimator<'a> {
    table: &'a BracketTable,
}

impl<'a> IncomeTaxEstimator<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &BracketTable {
        self.table
    }

    /// Computes tax, levy, net pay and employer super.
    ///
    /// A negative salary is treated as zero income. Employer super that
    /// would exceed the `Decimal` range is capped at its limit.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let gross = max(input.salary, Decimal::ZERO);
        let tax = income_tax(gross, self.table);
        let medicare = if input.include_medicare {
            round_whole(gross.saturating_mul(MEDICARE_LEVY_RATE))
        } else {
            Decimal::ZERO
        };
        let net = max(gross - tax - medicare, Decimal::ZERO);
        let super_employer_contribution = round_whole(gross.saturating_mul(input.super_percent));
        let effective_rate = if gross > Decimal::ZERO {
            tax.saturating_add(medicare).checked_div(gross)
        } else {
            None
        };

        tracing::debug!(
            financial_year = %self.table.financial_year(),
            gross = %gross,
            tax = %tax,
            medicare = %medicare,
            "income tax estimated"
        );

        TaxResult {
            gross,
            tax,
            medicare,
            net,
            super_employer_contribution,
            effective_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{FinancialYear, TaxBracket};

    fn reference() -> BracketTable {
        BracketTable::fy_2024_25()
    }

    fn estimate(
        salary: Decimal,
        include_medicare: bool,
    ) -> TaxResult {
        let table = reference();
        IncomeTaxEstimator::new(&table).calculate(&TaxInput {
            salary,
            include_medicare,
            super_percent: dec!(0.115),
        })
    }

    // =========================================================================
    // income_tax
    // =========================================================================

    #[test]
    fn no_tax_on_zero_income() {
        assert_eq!(income_tax(dec!(0), &reference()), dec!(0));
    }

    #[test]
    fn no_tax_at_tax_free_threshold() {
        assert_eq!(income_tax(dec!(18200), &reference()), dec!(0));
    }

    #[test]
    fn tax_at_second_threshold() {
        assert_eq!(income_tax(dec!(45000), &reference()), dec!(4288));
    }

    #[test]
    fn tax_spans_every_bracket() {
        // 4288 + 90000*0.30 + 55000*0.37 + 10000*0.45
        assert_eq!(income_tax(dec!(200000), &reference()), dec!(56138));
    }

    #[test]
    fn tax_rounds_to_whole_dollars() {
        // (18300.5 - 18200) * 0.16 = 16.08
        assert_eq!(income_tax(dec!(18300.5), &reference()), dec!(16));
        // (18203.125 - 18200) * 0.16 = 0.5
        assert_eq!(income_tax(dec!(18203.125), &reference()), dec!(1));
    }

    #[test]
    fn tax_is_monotonic_in_income() {
        let table = reference();
        let mut previous = Decimal::ZERO;
        let mut amount = Decimal::ZERO;
        while amount <= dec!(300000) {
            let tax = income_tax(amount, &table);
            assert!(tax >= previous, "tax decreased at {amount}");
            previous = tax;
            amount += dec!(1337);
        }
    }

    #[test]
    fn negative_income_has_no_tax() {
        assert_eq!(income_tax(dec!(-5000), &reference()), dec!(0));
    }

    #[test]
    fn uses_injected_table() {
        let flat = BracketTable::new(
            FinancialYear::new(2099),
            vec![TaxBracket::new(dec!(0), dec!(0.10))],
        )
        .unwrap();

        assert_eq!(income_tax(dec!(1000), &flat), dec!(100));
    }

    // =========================================================================
    // estimator
    // =========================================================================

    #[test]
    fn net_is_gross_less_tax_and_medicare() {
        let result = estimate(dec!(120000), true);

        assert_eq!(result.tax, dec!(26788));
        assert_eq!(result.medicare, dec!(2400));
        assert_eq!(result.net, result.gross - result.tax - result.medicare);
    }

    #[test]
    fn medicare_can_be_excluded() {
        let result = estimate(dec!(90000), false);

        assert_eq!(result.medicare, dec!(0));
        assert_eq!(result.net, dec!(72212));
    }

    #[test]
    fn super_is_rounded_share_of_gross() {
        let result = estimate(dec!(54321), true);

        // 54321 * 0.115 = 6246.915
        assert_eq!(result.super_employer_contribution, dec!(6247));
    }

    #[test]
    fn effective_rate_is_undefined_for_zero_salary() {
        let result = estimate(dec!(0), true);

        assert_eq!(result.effective_rate, None);
        assert_eq!(result.net, dec!(0));
    }

    #[test]
    fn effective_rate_includes_medicare() {
        let result = estimate(dec!(100000), true);

        assert_eq!(result.effective_rate, Some(dec!(0.22788)));
    }

    #[test]
    fn negative_salary_is_treated_as_zero() {
        let result = estimate(dec!(-100), true);

        assert_eq!(result.gross, dec!(0));
        assert_eq!(result.medicare, dec!(0));
        assert_eq!(result.effective_rate, None);
    }

    #[test]
    fn oversized_super_saturates() {
        let table = reference();
        let result = IncomeTaxEstimator::new(&table).calculate(&TaxInput {
            salary: Decimal::MAX,
            include_medicare: true,
            super_percent: dec!(2),
        });

        assert_eq!(result.super_employer_contribution, Decimal::MAX);
        assert_eq!(result.net, Decimal::MAX - result.tax - result.medicare);
        assert!(result.effective_rate.is_some());
    }
}
