use std::path::{Path, PathBuf};

use anyhow::Context;
use loginstats_analysis::{combined::CombinedTable, metric::Metric};
use tracing::{info, warn};

use super::{DEFAULT_COMBINED, DEFAULT_OUTPUT_DIR};
use crate::{
    chart::{self, BoxPlotChart, HistogramChart},
    util,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub(crate) struct ChartOptions {
    /// TrueType font for chart text (defaults to an installed system font)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct ChartArg {
    /// Combined per-user table written by `aggregate`
    #[arg(long, default_value = DEFAULT_COMBINED)]
    pub combined: PathBuf,
    /// Directory to write the chart images into
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub options: ChartOptions,
}

pub(crate) fn run(arg: &ChartArg) -> anyhow::Result<()> {
    let table = util::read_combined_file(&arg.combined)?;
    write_charts(&table, &arg.output_dir, &arg.options)?;
    Ok(())
}

/// Renders every histogram and box plot of the table into `output_dir`,
/// returning the paths written.
pub(crate) fn write_charts(
    table: &CombinedTable,
    output_dir: &Path,
    options: &ChartOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    let draw_text = match chart::load_font(options.font.as_deref())? {
        Some(font) => {
            info!("Using font {}", font.display());
            true
        }
        None => {
            warn!("No TrueType font found, charts are drawn without captions and axis labels");
            false
        }
    };
    render_charts(table, output_dir, draw_text)
}

fn render_charts(
    table: &CombinedTable,
    output_dir: &Path,
    draw_text: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    util::create_output_dir(output_dir)?;

    let mut written = vec![];
    for (scheme, rows) in table.split_by_scheme() {
        for metric in Metric::ALL {
            let Some(chart) = HistogramChart::new(scheme, metric, &rows) else {
                warn!("{scheme}: no values for {metric}, skipping histogram");
                continue;
            };
            let path = output_dir.join(chart.file_name());
            chart
                .draw(&path, draw_text)
                .with_context(|| format!("Failed to render chart: {}", path.display()))?;
            info!("Wrote {}", path.display());
            written.push(path);
        }

        let Some(chart) = BoxPlotChart::new(scheme, &rows) else {
            warn!("{scheme}: no user has both average login times, skipping box plot");
            continue;
        };
        let path = output_dir.join(chart.file_name());
        chart
            .draw(&path, draw_text)
            .with_context(|| format!("Failed to render chart: {}", path.display()))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
