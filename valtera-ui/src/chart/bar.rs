use crate::presenter::format::format_aud_f64;

const FULL: char = '█';

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn new(
        label: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Horizontal bar chart, one row per bar, scaled so the largest value fills
/// `width` cells. Values at or below zero draw no bar.
pub fn render_bar_chart(
    bars: &[Bar],
    width: usize,
) -> String {
    let label_width = bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = bars
        .iter()
        .map(|b| b.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for bar in bars {
        let cells = if max > 0.0 && bar.value.is_finite() && bar.value > 0.0 {
            ((bar.value / max) * width as f64).round() as usize
        } else {
            0
        };
        let pad = label_width - bar.label.chars().count();
        out.push_str(&format!(
            "{}{} |{}{} {}\n",
            bar.label,
            " ".repeat(pad),
            FULL.to_string().repeat(cells),
            " ".repeat(width - cells.min(width)),
            format_aud_f64(bar.value, 0),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn largest_bar_fills_width() {
        let bars = vec![Bar::new("Gross", 100.0), Bar::new("Tax", 25.0)];

        let txt = render_bar_chart(&bars, 8);

        let expected = concat!(
            "Gross |████████ $100\n",
            "Tax   |██       $25\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn zero_and_negative_bars_are_empty() {
        let bars = vec![Bar::new("A", 10.0), Bar::new("B", 0.0), Bar::new("C", -5.0)];

        let txt = render_bar_chart(&bars, 4);

        let expected = concat!(
            "A |████ $10\n",
            "B |     $0\n",
            "C |     -$5\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn all_zero_bars_do_not_divide_by_zero() {
        let bars = vec![Bar::new("Gross", 0.0), Bar::new("Net", 0.0)];

        let txt = render_bar_chart(&bars, 6);

        assert_eq!(txt.lines().count(), 2);
        assert!(!txt.contains(FULL));
    }
}
