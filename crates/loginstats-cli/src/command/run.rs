use std::path::PathBuf;

use tracing::info;

use super::{
    DEFAULT_OUTPUT_DIR,
    aggregate::{self, AggregateArg},
    chart::{self, ChartOptions},
    report::{self, ReportOptions},
};
use crate::util;

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct RunArg {
    #[command(flatten)]
    pub aggregate: AggregateArg,
    /// Directory to write statistics files and chart images into
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub report: ReportOptions,
    #[command(flatten)]
    pub chart: ChartOptions,
}

impl Default for RunArg {
    fn default() -> Self {
        Self {
            aggregate: AggregateArg::default(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            report: ReportOptions::default(),
            chart: ChartOptions::default(),
        }
    }
}

/// Runs the whole pipeline.
///
/// Reporting and charting read the combined table back from disk, exactly as
/// the standalone `report` and `chart` commands do.
pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    aggregate::run(&arg.aggregate)?;

    let table = util::read_combined_file(&arg.aggregate.output)?;
    report::write_reports(&table, &arg.output_dir, &arg.report)?;
    let charts = chart::write_charts(&table, &arg.output_dir, &arg.chart)?;

    info!(
        "Done: {} users, {} charts in {}",
        table.len(),
        charts.len(),
        arg.output_dir.display()
    );
    Ok(())
}
