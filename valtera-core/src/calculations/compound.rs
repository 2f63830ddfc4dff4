//! Month-by-month compound growth projection.
//!
//! The simulation applies a fixed monthly rate to the prior balance and then
//! adds the month's contribution, so contributions earn nothing in the month
//! they are made. Each balance is also deflated by cumulative inflation to
//! give its value in today's money.
//!
//! # Example
//!
//! ```
//! use valtera_core::calculations::{CompoundInput, simulate};
//!
//! let result = simulate(&CompoundInput {
//!     initial: 1000.0,
//!     monthly_contribution: 100.0,
//!     years: 1.0,
//!     annual_return_percent: 0.0,
//!     inflation_percent: 0.0,
//! });
//!
//! assert_eq!(result.months, 12);
//! assert_eq!(result.nominal_series.len(), 13);
//! assert_eq!(result.final_nominal, 2200.0);
//! assert_eq!(result.labels[12], "Year 1");
//! ```

use serde::{Deserialize, Serialize};

/// Longest projection the simulator will run (200 years).
pub const MAX_MONTHS: u32 = 12 * 200;

/// Inputs to the compound projection. Percentages are in percent, not
/// fractions (7.0 means 7% a year).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundInput {
    pub initial: f64,
    pub monthly_contribution: f64,
    pub years: f64,
    pub annual_return_percent: f64,
    pub inflation_percent: f64,
}

/// A projected series, one entry per month including month 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundResult {
    pub months: u32,
    /// `"Year {n}"` on year boundaries, empty otherwise.
    pub labels: Vec<String>,
    pub nominal_series: Vec<f64>,
    pub real_series: Vec<f64>,
    pub total_contrib: f64,
    pub final_nominal: f64,
    pub final_real: f64,
}

/// Number of simulated months for a horizon in years.
///
/// Rounds to the nearest month; zero, negative and non-finite horizons give
/// 0 and very long ones are capped at [`MAX_MONTHS`].
pub fn months_for_years(years: f64) -> u32 {
    let months = (years * 12.0).round();
    if months.is_nan() || months <= 0.0 {
        0
    } else if months >= f64::from(MAX_MONTHS) {
        MAX_MONTHS
    } else {
        months as u32
    }
}

/// Runs the projection.
pub fn simulate(input: &CompoundInput) -> CompoundResult {
    let months = months_for_years(input.years);
    let monthly_rate = input.annual_return_percent / 100.0 / 12.0;
    let inflation = input.inflation_percent / 100.0;

    let capacity = months as usize + 1;
    let mut labels = Vec::with_capacity(capacity);
    let mut nominal_series = Vec::with_capacity(capacity);
    let mut real_series = Vec::with_capacity(capacity);

    let mut balance = input.initial;
    for month in 0..=months {
        if month % 12 == 0 {
            labels.push(format!("Year {}", month / 12));
        } else {
            labels.push(String::new());
        }

        if month > 0 {
            balance = balance * (1.0 + monthly_rate) + input.monthly_contribution;
        }

        let elapsed_years = f64::from(month) / 12.0;
        let real = balance / (1.0 + inflation).powf(elapsed_years);

        nominal_series.push(balance);
        real_series.push(real);
    }

    let total_contrib = input.initial + input.monthly_contribution * f64::from(months);
    let final_real = real_series.last().copied().unwrap_or(input.initial);

    CompoundResult {
        months,
        labels,
        nominal_series,
        real_series,
        total_contrib,
        final_nominal: balance,
        final_real,
    }
}
