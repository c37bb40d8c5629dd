use std::path::Path;

use loginstats_analysis::{aggregate::UserStats, combined::Scheme, metric::Metric};
use plotters::prelude::*;

use super::{CHART_SIZE, FONT_FAMILY};

const TIME_AXIS_LABEL: &str = "Login time (s)";
const BOX_METRICS: [Metric; 2] = [Metric::AvgLoginTimeSuccess, Metric::AvgLoginTimeFailed];

/// Side-by-side box plots of the successful and failed average login times of
/// one scheme.
#[derive(Debug, Clone)]
pub(crate) struct BoxPlotChart {
    pub scheme: Scheme,
    /// Average times per metric, over users that have both.
    pub series: Vec<(Metric, Vec<f64>)>,
}

impl BoxPlotChart {
    /// Collects the users that have both average times, or returns `None` when
    /// there are none.
    pub(crate) fn new(scheme: Scheme, rows: &[&UserStats]) -> Option<Self> {
        let complete = rows
            .iter()
            .copied()
            .filter(|row| BOX_METRICS.iter().all(|metric| metric.value(row).is_some()))
            .collect::<Vec<_>>();
        if complete.is_empty() {
            return None;
        }
        let series = BOX_METRICS
            .into_iter()
            .map(|metric| (metric, metric.present_values(complete.iter().copied())))
            .collect();
        Some(Self { scheme, series })
    }

    pub(crate) fn title(&self) -> String {
        format!("{}: Avg time box plot", self.scheme)
    }

    pub(crate) fn file_name(&self) -> String {
        format!("{} box plot.png", self.scheme)
    }

    /// Renders the chart as a PNG at `path`.
    pub(crate) fn draw(&self, path: &Path, draw_text: bool) -> anyhow::Result<()> {
        let labels = self
            .series
            .iter()
            .map(|(metric, _)| metric.column_name())
            .collect::<Vec<_>>();
        let quartiles = self
            .series
            .iter()
            .map(|(_, values)| Quartiles::new(values.as_slice()))
            .collect::<Vec<_>>();
        let y_range = value_range(&quartiles);

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
        let mut chart = builder.build_cartesian_2d(labels[..].into_segmented(), y_range)?;

        if draw_text {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_label_formatter(&|value| match value {
                    SegmentValue::Exact(label) | SegmentValue::CenterOf(label) => {
                        (*label).to_string()
                    }
                    SegmentValue::Last => String::new(),
                })
                .y_desc(TIME_AXIS_LABEL)
                .axis_desc_style((FONT_FAMILY, 20))
                .draw()?;
        }

        chart.draw_series(labels.iter().zip(&quartiles).map(|(label, quartiles)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(label), quartiles)
                .width(80)
                .whisker_width(0.5)
                .style(BLUE)
        }))?;

        root.present()?;
        Ok(())
    }
}

/// Vertical extent covering every whisker, padded so that boxes do not touch
/// the chart border.
fn value_range(quartiles: &[Quartiles]) -> std::ops::Range<f32> {
    let (min, max) = quartiles
        .iter()
        .map(Quartiles::values)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), values| {
            (min.min(values[0]), max.max(values[4]))
        });
    let padding = ((max - min) * 0.05).max(1.0);
    min - padding..max + padding
}
