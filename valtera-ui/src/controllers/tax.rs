use rust_decimal::prelude::ToPrimitive;
use valtera_core::BracketTable;
use valtera_core::calculations::IncomeTaxEstimator;
use valtera_core::forms::{TaxForm, TaxRequest};

use super::Outcome;
use crate::chart::{Bar, Chart, ChartData};
use crate::presenter::{tax_bars, tax_cards};

pub struct TaxController {
    form: TaxForm,
    chart: Option<Chart>,
}

impl TaxController {
    pub fn new(
        form: TaxForm,
        chart: Option<Chart>,
    ) -> Self {
        Self { form, chart }
    }

    pub fn form(&self) -> &TaxForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaxForm {
        &mut self.form
    }

    pub fn reset(&mut self) {
        self.form = TaxForm::default();
    }

    /// The typed request, so the caller can fetch the right bracket table.
    pub fn request(&self) -> TaxRequest {
        self.form.read()
    }

    /// Estimates tax against `table` and redraws the five-bar chart.
    pub fn update(
        &mut self,
        table: &BracketTable,
    ) -> Outcome {
        let request = self.request();
        if request.financial_year != table.financial_year() {
            tracing::warn!(
                requested = %request.financial_year,
                table = %table.financial_year(),
                "estimating with a table for a different year"
            );
        }
        let result = IncomeTaxEstimator::new(table).calculate(&request.input);

        let chart = self.chart.as_mut().and_then(|chart| {
            let bars = tax_bars(&result)
                .into_iter()
                .map(|(label, value)| Bar::new(label, value.to_f64().unwrap_or(0.0)))
                .collect();
            chart.update(ChartData::Bars(bars));
            chart.render()
        });

        Outcome {
            title: format!("Income tax FY{}", table.financial_year()),
            cards: tax_cards(&result),
            chart,
        }
    }

    pub fn dispose(&mut self) {
        if let Some(chart) = self.chart.as_mut() {
            chart.dispose();
        }
    }
}
