use valtera_core::calculations::simulate;
use valtera_core::forms::CompoundForm;

use super::Outcome;
use crate::chart::{Chart, ChartData, Series};
use crate::presenter::compound_cards;

pub struct CompoundController {
    form: CompoundForm,
    chart: Option<Chart>,
}

impl CompoundController {
    pub fn new(
        form: CompoundForm,
        chart: Option<Chart>,
    ) -> Self {
        Self { form, chart }
    }

    pub fn form(&self) -> &CompoundForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CompoundForm {
        &mut self.form
    }

    /// Restores the default field values.
    pub fn reset(&mut self) {
        self.form = CompoundForm::default();
    }

    /// Projects the balance and redraws the two-series chart.
    pub fn update(&mut self) -> Outcome {
        let input = self.form.read();
        let result = simulate(&input);

        let chart = self.chart.as_mut().and_then(|chart| {
            chart.update(ChartData::Line {
                labels: result.labels.clone(),
                series: vec![
                    Series::new("Nominal Value", '*', result.nominal_series.clone()),
                    Series::new("Real (Inflation-Adjusted)", '.', result.real_series.clone()),
                ],
            });
            chart.render()
        });

        Outcome {
            title: format!("Compound growth over {} months", result.months),
            cards: compound_cards(&result),
            chart,
        }
    }

    pub fn dispose(&mut self) {
        if let Some(chart) = self.chart.as_mut() {
            chart.dispose();
        }
    }
}
