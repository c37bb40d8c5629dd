use std::path::Path;

use loginstats_analysis::{
    aggregate::UserStats,
    combined::Scheme,
    metric::{Metric, MetricKind},
};
use loginstats_stats::histogram::Histogram;
use plotters::prelude::*;

use super::{CHART_SIZE, FONT_FAMILY, USERS_AXIS_LABEL};

const COUNT_BIN_WIDTH: f64 = 1.0;
const DURATION_BIN_WIDTH: f64 = 4.0;

/// Frequency histogram of one metric across the users of one scheme.
#[derive(Debug, Clone)]
pub(crate) struct HistogramChart {
    pub scheme: Scheme,
    pub metric: Metric,
    pub histogram: Histogram,
}

impl HistogramChart {
    /// Bins the present values of `metric`, or returns `None` when no user has
    /// one.
    ///
    /// Counts use unit bins starting at the smallest value. Durations use bins
    /// aligned to multiples of four seconds that start at zero or below.
    pub(crate) fn new(scheme: Scheme, metric: Metric, rows: &[&UserStats]) -> Option<Self> {
        let values = metric.present_values(rows.iter().copied());
        let histogram = match metric.kind() {
            MetricKind::Count => Histogram::with_bin_width(values, COUNT_BIN_WIDTH, None),
            MetricKind::Duration => {
                Histogram::with_bin_width(values, DURATION_BIN_WIDTH, Some(0.0))
            }
        };
        (!histogram.bins.is_empty()).then_some(Self {
            scheme,
            metric,
            histogram,
        })
    }

    pub(crate) fn title(&self) -> String {
        format!("{}: {} histogram", self.scheme, self.metric)
    }

    pub(crate) fn x_label(&self) -> String {
        match self.metric.kind() {
            MetricKind::Count => format!("Num of {}", self.metric),
            MetricKind::Duration => self.metric.to_string(),
        }
    }

    pub(crate) fn file_name(&self) -> String {
        format!("{} {} histogram.png", self.scheme, self.metric)
    }

    /// Renders the chart as a PNG at `path`.
    ///
    /// Without `draw_text` the caption and axes are left out, which needs no
    /// font.
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn draw(&self, path: &Path, draw_text: bool) -> anyhow::Result<()> {
        let Some(x_range) = self.histogram.span() else {
            anyhow::bail!("Histogram of {} has no bins", self.metric);
        };
        let y_max = (self.histogram.max_count() as f64 * 1.1).max(1.0);

        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if draw_text {
            builder
                .caption(self.title(), (FONT_FAMILY, 32))
                .x_label_area_size(50)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d(x_range, 0f64..y_max)?;

        if draw_text {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(self.x_label())
                .y_desc(USERS_AXIS_LABEL)
                .axis_desc_style((FONT_FAMILY, 20))
                .draw()?;
        }

        let bars = self.histogram.bins.iter().map(|bin| {
            [(bin.range.start, 0.0), (bin.range.end, bin.count as f64)]
        });
        chart.draw_series(
            bars.clone()
                .map(|corners| Rectangle::new(corners, BLUE.mix(0.5).filled())),
        )?;
        chart.draw_series(bars.map(|corners| Rectangle::new(corners, BLACK.stroke_width(1))))?;

        root.present()?;
        Ok(())
    }
}
