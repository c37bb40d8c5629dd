use std::path::{Path, PathBuf};

use anyhow::Context;
use loginstats_analysis::{
    combined::CombinedTable,
    summary::{self, SummaryTable},
};
use tracing::{debug, info};

use super::{DEFAULT_COMBINED, DEFAULT_OUTPUT_DIR};
use crate::util::{self, Output};

#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub(crate) struct ReportOptions {
    /// Also write all summary tables as JSON to PATH (stdout if omitted or `-`)
    #[arg(long, value_name = "PATH")]
    pub json: Option<Option<PathBuf>>,
}

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct ReportArg {
    /// Combined per-user table written by `aggregate`
    #[arg(long, default_value = DEFAULT_COMBINED)]
    pub combined: PathBuf,
    /// Directory to write the statistics files into
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub options: ReportOptions,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let table = util::read_combined_file(&arg.combined)?;
    write_reports(&table, &arg.output_dir, &arg.options)?;
    Ok(())
}

/// Writes one statistics file per scheme and metric group, returning the
/// tables written.
pub(crate) fn write_reports(
    table: &CombinedTable,
    output_dir: &Path,
    options: &ReportOptions,
) -> anyhow::Result<Vec<SummaryTable>> {
    util::create_output_dir(output_dir)?;

    let summaries = summary::summarize(table);
    for summary in &summaries {
        for row in &summary.rows {
            debug!(
                "{} {}: n={} mean={:?} std={:?} median={:?}",
                summary.scheme, row.metric, row.count, row.mean, row.std_dev, row.median
            );
        }
        let path = summary.write_to_dir(output_dir).with_context(|| {
            format!(
                "Failed to write {} statistics to {}",
                summary.scheme,
                output_dir.display()
            )
        })?;
        info!("Wrote {}", path.display());
    }

    if let Some(json) = &options.json {
        Output::save_json(&summaries, json.clone())?;
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use loginstats_analysis::{aggregate::UserStats, combined::Scheme};

    use super::*;

    fn table() -> CombinedTable {
        let user = |id: &str, success: u32, avg: f64| UserStats {
            user_id: id.into(),
            total_logins: success,
            successful_logins: success,
            unsuccessful_logins: 0,
            avg_login_time_success: Some(avg),
            avg_login_time_failed: None,
        };
        CombinedTable::combine([
            (Scheme::Image21, vec![user("a", 2, 6.0), user("b", 4, 10.0)]),
            (Scheme::Text21, vec![user("a", 1, 3.0)]),
        ])
    }

    #[test]
    fn test_writes_every_statistics_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("stats");
        let summaries = write_reports(&table(), &output_dir, &ReportOptions::default()).unwrap();
        assert_eq!(summaries.len(), 4);
        for summary in &summaries {
            assert!(output_dir.join(summary.file_name()).is_file());
        }

        let text =
            fs::read_to_string(output_dir.join("Image21 login time per user stats.csv")).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], ",mean,standard deviation,median");
        assert!(lines[1].starts_with("avg login time success (s),8.0,"));
        assert_eq!(lines[2], "avg login time failed (s),,,");
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("summary.json");
        let options = ReportOptions {
            json: Some(Some(json_path.clone())),
        };
        write_reports(&table(), dir.path(), &options).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        let tables = value.as_array().unwrap();
        assert_eq!(tables.len(), 4);
        assert_eq!(tables[2]["scheme"], "Text21");
        assert_eq!(tables[2]["rows"][0]["mean"], 1.0);
    }
}
