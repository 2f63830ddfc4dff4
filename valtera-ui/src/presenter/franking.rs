use rust_decimal::Decimal;
use valtera_core::calculations::FrankingResult;

use super::SummaryCard;
use super::format::{format_aud, format_percent};

/// Adjustments smaller than this are shown as exactly zero.
pub const WATERFALL_EPSILON: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// How a waterfall bar is drawn relative to the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Starts from zero; also resets the running total.
    Base,
    /// Moves the running total by `value` (either sign).
    Delta,
    /// Drawn from zero to `value`, which is the running total.
    Total,
    /// A difference from the cash dividend; drawn from zero and not added
    /// to the running total.
    Adjustment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterfallStep {
    pub label: &'static str,
    pub kind: StepKind,
    pub value: Decimal,
}

impl WaterfallStep {
    fn new(
        label: &'static str,
        kind: StepKind,
        value: Decimal,
    ) -> Self {
        Self { label, kind, value }
    }
}

/// Rounds sub-cent noise to exactly zero for display.
pub fn neutralise(value: Decimal) -> Decimal {
    if value.abs() < WATERFALL_EPSILON {
        Decimal::ZERO
    } else {
        value
    }
}

/// Waterfall from the cash dividend to the grossed-up amount and, when a
/// personal rate was given, on to the after-tax income.
pub fn waterfall_steps(result: &FrankingResult) -> Vec<WaterfallStep> {
    let mut steps = vec![
        WaterfallStep::new("Cash dividend", StepKind::Base, result.dividend),
        WaterfallStep::new("+ Franking credit", StepKind::Delta, result.credit),
        WaterfallStep::new("= Grossed-up", StepKind::Total, result.grossed_up),
    ];

    if let Some(after) = &result.after_tax {
        steps.push(WaterfallStep::new(
            "- Personal tax",
            StepKind::Delta,
            -after.personal_tax,
        ));
        steps.push(WaterfallStep::new(
            "= After tax",
            StepKind::Total,
            after.after_tax,
        ));
        steps.push(WaterfallStep::new(
            "Gross adjustment",
            StepKind::Adjustment,
            neutralise(after.after_tax - result.dividend),
        ));
    }

    steps
}

/// Summary cards: the credit, the grossed-up amount with its franking basis
/// and, when a personal rate was given, the after-tax outcome.
pub fn franking_cards(result: &FrankingResult) -> Vec<SummaryCard> {
    let mut cards = vec![
        SummaryCard::new("Franking credit", format_aud(result.credit, 2)),
        SummaryCard::new("Grossed-up dividend", format_aud(result.grossed_up, 2)),
        SummaryCard::new(
            "Franking basis",
            format!(
                "{} franked at {} company rate",
                format_percent(result.franking_percent / Decimal::ONE_HUNDRED),
                format_percent(result.company_rate),
            ),
        ),
    ];

    if let Some(after) = &result.after_tax {
        let rate = format_percent(after.personal_rate);
        cards.push(SummaryCard::new(
            format!("Personal tax (at {rate})"),
            format_aud(after.personal_tax, 2),
        ));
        cards.push(SummaryCard::new(
            format!("After-tax income (at {rate})"),
            format_aud(after.after_tax, 2),
        ));
    }

    cards
}
