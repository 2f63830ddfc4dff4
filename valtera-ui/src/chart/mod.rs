//! Text charts for terminal output.
//!
//! Rendering is deterministic for a given size so output can be compared
//! in tests. Each calculator owns one [`Chart`] and replaces its data on
//! every recompute.

mod bar;
mod line;
mod waterfall;

pub use bar::{Bar, render_bar_chart};
pub use line::{Series, render_line_chart};
pub use waterfall::render_waterfall;

use crate::presenter::WaterfallStep;

/// Smallest drawable plot area; requests below this are raised to it.
pub const MIN_WIDTH: usize = 10;
pub const MIN_HEIGHT: usize = 5;

/// What a chart currently plots.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Several series sharing one x axis; `labels` are sparse tick labels,
    /// one per point.
    Line {
        labels: Vec<String>,
        series: Vec<Series>,
    },
    Bars(Vec<Bar>),
    Waterfall(Vec<WaterfallStep>),
}

/// A chart component owned by one calculator.
///
/// [`update`](Chart::update) swaps the plotted data wholesale and
/// [`dispose`](Chart::dispose) releases it; a disposed chart renders
/// nothing until it is updated again.
#[derive(Debug, Clone)]
pub struct Chart {
    width: usize,
    height: usize,
    data: Option<ChartData>,
}

impl Chart {
    pub fn new(
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            data: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Replaces whatever was plotted before.
    pub fn update(
        &mut self,
        data: ChartData,
    ) {
        self.data = Some(data);
    }

    pub fn dispose(&mut self) {
        if self.data.take().is_some() {
            tracing::trace!("chart disposed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.data.is_some()
    }

    /// Draws the current data, or `None` when nothing is plotted.
    pub fn render(&self) -> Option<String> {
        let text = match self.data.as_ref()? {
            ChartData::Line { labels, series } => {
                render_line_chart(labels, series, self.width, self.height)
            }
            ChartData::Bars(bars) => render_bar_chart(bars, self.width),
            ChartData::Waterfall(steps) => render_waterfall(steps, self.width),
        };
        Some(text)
    }
}
