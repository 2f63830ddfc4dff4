use valtera_core::calculations::{FrankingCalculator, FrankingError};
use valtera_core::forms::FrankingForm;

use super::Outcome;
use crate::chart::{Chart, ChartData};
use crate::presenter::{franking_cards, waterfall_steps};

pub struct FrankingController {
    form: FrankingForm,
    chart: Option<Chart>,
}

impl FrankingController {
    pub fn new(
        form: FrankingForm,
        chart: Option<Chart>,
    ) -> Self {
        Self { form, chart }
    }

    pub fn form(&self) -> &FrankingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FrankingForm {
        &mut self.form
    }

    pub fn reset(&mut self) {
        self.form = FrankingForm::default();
    }

    /// Computes the credit and redraws the waterfall.
    ///
    /// # Errors
    ///
    /// Any rejected field. The chart is cleared so no stale figures remain
    /// on screen.
    pub fn update(&mut self) -> Result<Outcome, FrankingError> {
        let result = match self.form.read().and_then(|input| FrankingCalculator::calculate(&input)) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(cause = %e, "franking inputs rejected");
                self.dispose();
                return Err(e);
            }
        };

        let chart = self.chart.as_mut().and_then(|chart| {
            chart.update(ChartData::Waterfall(waterfall_steps(&result)));
            chart.render()
        });

        Ok(Outcome {
            title: "Franking credit".to_string(),
            cards: franking_cards(&result),
            chart,
        })
    }

    pub fn dispose(&mut self) {
        if let Some(chart) = self.chart.as_mut() {
            chart.dispose();
        }
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(dividend: &str) -> FrankingForm {
        FrankingForm {
            dividend: dividend.to_string(),
            ..FrankingForm::default()
        }
    }

    #[test]
    fn valid_form_produces_cards_and_waterfall() {
        let mut controller = FrankingController::new(form("700"), Some(Chart::new(30, 5)));

        let outcome = controller.update().unwrap();

        assert_eq!(outcome.cards[0].value, "$300.00");
        let chart = outcome.chart.unwrap();
        assert_eq!(chart.lines().count(), 3);
        assert!(chart.contains("+ Franking credit"));
    }

    #[test]
    fn default_form_is_rejected() {
        let mut controller = FrankingController::new(FrankingForm::default(), None);

        let result = controller.update();

        assert!(matches!(
            result,
            Err(FrankingError::InvalidNumber { field: "dividend", .. })
        ));
    }

    #[test]
    fn rejection_clears_previous_chart() {
        let mut controller = FrankingController::new(form("700"), Some(Chart::new(30, 5)));
        controller.update().unwrap();

        controller.form_mut().tax_rate = "100".to_string();
        let result = controller.update();

        assert!(matches!(result, Err(FrankingError::CompanyRateOutOfRange(_))));
        assert!(!controller.chart().unwrap().is_active());
    }
}
