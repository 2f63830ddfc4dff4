use rust_decimal::Decimal;
use valtera_core::calculations::TaxResult;

use super::SummaryCard;
use super::format::{format_aud, opt_percent_display};

/// Category order of the tax bar chart.
pub const TAX_CHART_LABELS: [&str; 5] = ["Gross", "Net", "Tax", "Medicare", "Super"];

pub fn tax_cards(result: &TaxResult) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new("Gross Salary", format_aud(result.gross, 0)),
        SummaryCard::new("Net (After Tax/Medicare)", format_aud(result.net, 0)),
        SummaryCard::new("Income Tax", format_aud(result.tax, 0)),
        SummaryCard::new("Medicare (approx.)", format_aud(result.medicare, 0)),
        SummaryCard::new(
            "Employer Super",
            format_aud(result.super_employer_contribution, 0),
        ),
        SummaryCard::new(
            "Effective Tax+Medicare",
            opt_percent_display(result.effective_rate),
        ),
    ]
}

/// `(label, amount)` pairs in [`TAX_CHART_LABELS`] order.
pub fn tax_bars(result: &TaxResult) -> Vec<(&'static str, Decimal)> {
    let values = [
        result.gross,
        result.net,
        result.tax,
        result.medicare,
        result.super_employer_contribution,
    ];
    TAX_CHART_LABELS.into_iter().zip(values).collect()
}
