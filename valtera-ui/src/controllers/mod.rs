//! One controller per calculator: it owns the raw form and the chart, and
//! runs read, compute and present in a single [`update`](CompoundController::update).
//!
//! Controllers never touch storage; loading and saving the form is the
//! caller's job.

mod compound;
mod franking;
mod tax;

use std::fmt;

pub use compound::CompoundController;
pub use franking::FrankingController;
pub use tax::TaxController;

use crate::presenter::{SummaryCard, render_cards};

/// Everything one recompute produces for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub title: String,
    pub cards: Vec<SummaryCard>,
    /// Rendered chart, absent when charts are disabled.
    pub chart: Option<String>,
}

impl fmt::Display for Outcome {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", render_cards(&self.cards))?;
        if let Some(chart) = &self.chart {
            writeln!(f)?;
            write!(f, "{chart}")?;
        }
        Ok(())
    }
}
