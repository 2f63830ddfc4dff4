use valtera_core::calculations::CompoundResult;

use super::SummaryCard;
use super::format::{PLACEHOLDER, format_aud_f64, format_percent_f64};

/// Growth of `value` relative to what was contributed, or `None` when the
/// ratio is not a finite number (nothing contributed).
pub fn gain_ratio(
    value: f64,
    total_contrib: f64,
) -> Option<f64> {
    let ratio = (value - total_contrib) / total_contrib;
    ratio.is_finite().then_some(ratio)
}

fn gain_display(ratio: Option<f64>) -> String {
    ratio
        .map(format_percent_f64)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Summary cards for a projection: contributions, final balances and the
/// gain or loss against contributions.
pub fn compound_cards(result: &CompoundResult) -> Vec<SummaryCard> {
    let nominal_gain = gain_ratio(result.final_nominal, result.total_contrib);
    let real_gain = gain_ratio(result.final_real, result.total_contrib);

    vec![
        SummaryCard::new("Total Contributed", format_aud_f64(result.total_contrib, 0)),
        SummaryCard::new("Final Nominal", format_aud_f64(result.final_nominal, 0)),
        SummaryCard::new("Final Real", format_aud_f64(result.final_real, 0)),
        SummaryCard::new("Nominal Gain/Loss", gain_display(nominal_gain)),
        SummaryCard::new("Real Gain/Loss", gain_display(real_gain)),
    ]
}
