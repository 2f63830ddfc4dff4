use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::presenter::format::format_aud;
use crate::presenter::{StepKind, WaterfallStep};

const SOLID: char = '█';
const RISE: char = '▓';
const FALL: char = '░';
const ZERO: char = '│';

/// Value-space extent of one bar.
struct Span {
    from: f64,
    to: f64,
}

fn spans(steps: &[WaterfallStep]) -> Vec<Span> {
    let mut running = 0.0;
    steps
        .iter()
        .map(|step| {
            let value = step.value.to_f64().unwrap_or(0.0);
            match step.kind {
                StepKind::Base | StepKind::Total => {
                    running = value;
                    Span { from: 0.0, to: value }
                }
                StepKind::Delta => {
                    let from = running;
                    running += value;
                    Span { from, to: running }
                }
                StepKind::Adjustment => Span { from: 0.0, to: value },
            }
        })
        .collect()
}

/// Horizontal waterfall: totals are drawn from zero, deltas float from the
/// running total. Values are printed to the cent.
pub fn render_waterfall(
    steps: &[WaterfallStep],
    width: usize,
) -> String {
    let spans = spans(steps);

    let (lo, hi) = spans
        .iter()
        .flat_map(|s| [s.from, s.to])
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let range = if hi > lo { hi - lo } else { 1.0 };
    let col = |v: f64| (((v - lo) / range) * (width as f64 - 1.0)).round() as usize;

    let label_width = steps
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (step, span) in steps.iter().zip(&spans) {
        let start = col(span.from.min(span.to));
        let end = col(span.from.max(span.to));
        let glyph = match step.kind {
            _ if step.value == Decimal::ZERO => ZERO,
            StepKind::Base | StepKind::Total => SOLID,
            _ if step.value > Decimal::ZERO => RISE,
            _ => FALL,
        };
        let cells = (end - start).max(1);

        let mut row = vec![' '; width];
        for cell in row.iter_mut().skip(start).take(cells) {
            *cell = glyph;
        }

        out.push_str(&format!(
            "{:<label_width$} |{}| {}\n",
            step.label,
            row.into_iter().collect::<String>(),
            format_aud(step.value, 2),
        ));
    }
    out
}
