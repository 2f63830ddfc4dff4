//! Turns calculation results into display strings.
//!
//! Each calculator gets a fixed, ordered list of [`SummaryCard`]s plus the
//! data its chart plots. Nothing here touches storage or the terminal.

mod compound;
mod franking;
pub mod format;
mod tax;

use std::fmt;

pub use compound::{compound_cards, gain_ratio};
pub use franking::{
    StepKind, WATERFALL_EPSILON, WaterfallStep, franking_cards, neutralise, waterfall_steps,
};
pub use tax::{TAX_CHART_LABELS, tax_bars, tax_cards};

/// The one message shown for any rejected franking input.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid values.";

/// A single labelled figure in a calculator summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
}

impl SummaryCard {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for SummaryCard {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Lays cards out one per line with their values aligned.
pub fn render_cards(cards: &[SummaryCard]) -> String {
    let width = cards
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for card in cards {
        let pad = width - card.label.chars().count();
        out.push_str(&format!("  {}{}  {}\n", card.label, " ".repeat(pad), card.value));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cards_are_aligned_on_values() {
        let cards = vec![
            SummaryCard::new("Gross Salary", "$90,000"),
            SummaryCard::new("Income Tax", "$17,788"),
        ];

        let text = render_cards(&cards);

        assert_eq!(text, "  Gross Salary  $90,000\n  Income Tax    $17,788\n");
    }

    #[test]
    fn no_cards_render_nothing() {
        assert_eq!(render_cards(&[]), "");
    }

    #[test]
    fn card_display_is_label_and_value() {
        assert_eq!(SummaryCard::new("Final Real", "$1").to_string(), "Final Real: $1");
    }
}
