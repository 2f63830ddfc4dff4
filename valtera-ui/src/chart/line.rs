//! Multi-series line chart on a fixed character grid.
//!
//! Series are drawn in order; a later series only fills cells the earlier
//! ones left blank. The y axis is labelled with the padded range and the
//! x axis with whichever tick labels fit without overlapping.

use crate::presenter::format::format_aud_f64;

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub glyph: char,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(
        name: impl Into<String>,
        glyph: char,
        values: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            glyph,
            values,
        }
    }
}

pub fn render_line_chart(
    labels: &[String],
    series: &[Series],
    width: usize,
    height: usize,
) -> String {
    let points = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    if points == 0 {
        return String::new();
    }

    let (y_min, y_max) = y_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for s in series {
        draw_series(&mut grid, s, points, y_min, y_max);
    }

    let top = format_aud_f64(y_max, 0);
    let bottom = format_aud_f64(y_min, 0);
    let axis_width = top.chars().count().max(bottom.chars().count());

    let mut out = String::new();
    let legend: Vec<String> = series
        .iter()
        .map(|s| format!("{} {}", s.glyph, s.name))
        .collect();
    out.push_str(&format!("{}   {}\n", " ".repeat(axis_width), legend.join("   ")));

    for (row_idx, row) in grid.into_iter().enumerate() {
        let tick = if row_idx == 0 {
            top.as_str()
        } else if row_idx == height - 1 {
            bottom.as_str()
        } else {
            ""
        };
        out.push_str(&format!(
            "{tick:>axis_width$} |{}\n",
            row.into_iter().collect::<String>()
        ));
    }

    out.push_str(&format!("{} +{}\n", " ".repeat(axis_width), "-".repeat(width)));
    out.push_str(&format!(
        "{}  {}\n",
        " ".repeat(axis_width),
        x_ticks(labels, points, width).trim_end()
    ));
    out
}

fn y_range(series: &[Series]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &v in series.iter().flat_map(|s| s.values.iter()) {
        if v.is_finite() {
            min_y = min_y.min(v);
            max_y = max_y.max(v);
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        None
    } else if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // flat line: give it some room
        let half = (min_y.abs() * 0.5).max(1.0);
        Some((min_y - half, max_y + half))
    }
}

fn pad_range(
    min: f64,
    max: f64,
    frac: f64,
) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(
    index: usize,
    points: usize,
    width: usize,
) -> usize {
    if points < 2 {
        return 0;
    }
    let u = index as f64 / (points as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(
    y: f64,
    y_min: f64,
    y_max: f64,
    height: usize,
) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // row 0 is the top of the chart
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(
    grid: &mut [Vec<char>],
    series: &Series,
    points: usize,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for (i, &v) in series.values.iter().enumerate() {
        if !v.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(i, points, width);
        let y = map_y(v, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, series.glyph),
            None => plot(grid, x, y, series.glyph),
        }
        prev = Some((x, y));
    }
}

fn plot(
    grid: &mut [Vec<char>],
    x: usize,
    y: usize,
    ch: char,
) {
    if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        if *cell == ' ' {
            *cell = ch;
        }
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(
    grid: &mut [Vec<char>],
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    ch: char,
) {
    let (mut x, mut y) = (x0 as isize, y0 as isize);
    let (x1, y1) = (x1 as isize, y1 as isize);

    let dx = (x1 - x).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let dy = -(y1 - y).abs();
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 {
            plot(grid, x as usize, y as usize, ch);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Places each non-empty label at its column, skipping any that would run
/// into the previous one.
fn x_ticks(
    labels: &[String],
    points: usize,
    width: usize,
) -> String {
    let mut line = vec![' '; width];
    let mut next_free = 0;
    for (i, label) in labels.iter().enumerate().take(points) {
        if label.is_empty() {
            continue;
        }
        let start = map_x(i, points, width);
        let len = label.chars().count();
        if start < next_free || start + len > width {
            continue;
        }
        for (offset, ch) in label.chars().enumerate() {
            line[start + offset] = ch;
        }
        next_free = start + len + 1;
    }
    line.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| if i % 2 == 0 { format!("Y{}", i / 2) } else { String::new() })
            .collect()
    }

    #[test]
    fn rising_series_snapshot() {
        let series = vec![Series::new("Up", '*', vec![0.0, 50.0, 100.0])];

        let txt = render_line_chart(&labels(3), &series, 10, 5);

        let expected = concat!(
            "       * Up\n",
            "$105 |        **\n",
            "     |      **  \n",
            "     |    **    \n",
            "     |  **      \n",
            " -$5 |**        \n",
            "     +----------\n",
            "      Y0\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn output_has_legend_grid_axis_and_ticks() {
        let series = vec![
            Series::new("Nominal", '*', vec![1.0, 2.0, 3.0, 4.0]),
            Series::new("Real", '.', vec![1.0, 1.5, 2.0, 2.5]),
        ];

        let txt = render_line_chart(&labels(4), &series, 20, 8);

        assert_eq!(txt.lines().count(), 1 + 8 + 2);
        assert!(txt.lines().next().unwrap().contains("* Nominal   . Real"));
    }

    #[test]
    fn first_series_wins_shared_cells() {
        let series = vec![
            Series::new("A", '*', vec![5.0, 5.0]),
            Series::new("B", '.', vec![5.0, 5.0]),
        ];

        let txt = render_line_chart(&[], &series, 10, 5);

        let plot_rows: Vec<&str> = txt.lines().filter(|l| l.contains('|')).collect();
        assert!(plot_rows.iter().any(|l| l.contains('*')));
        assert!(plot_rows.iter().all(|l| !l.contains('.')));
    }

    #[test]
    fn single_point_is_plotted_in_first_column() {
        let series = vec![Series::new("Only", 'o', vec![5000.0])];

        let txt = render_line_chart(&["Year 0".to_string()], &series, 10, 5);

        let plotted: Vec<&str> = txt.lines().filter(|l| l.contains("|o")).collect();
        assert_eq!(plotted.len(), 1);
        assert!(txt.contains("Year 0"));
    }

    #[test]
    fn empty_series_render_nothing() {
        assert_eq!(render_line_chart(&[], &[], 10, 5), "");
    }

    #[test]
    fn overlapping_tick_labels_are_skipped() {
        let labels = vec!["Year 0".to_string(), "Year 1".to_string(), "Year 2".to_string()];

        let ticks = x_ticks(&labels, 3, 12);

        assert_eq!(ticks.trim_end(), "Year 0");
    }
}
