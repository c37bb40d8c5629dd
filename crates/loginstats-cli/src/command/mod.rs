use clap::{Parser, Subcommand};

use self::{aggregate::AggregateArg, chart::ChartArg, report::ReportArg, run::RunArg};
use crate::logging;

mod aggregate;
mod chart;
mod report;
mod run;

const DEFAULT_IMAGE_LOG: &str = "imagept21.csv";
const DEFAULT_TEXT_LOG: &str = "text21.csv";
const DEFAULT_COMBINED: &str = "combined.csv";
const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Pair sessions in both event logs and write the combined per-user table
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Write per-scheme summary statistics of the combined table
    Report(#[clap(flatten)] ReportArg),
    /// Render histograms and box plots of the combined table
    Chart(#[clap(flatten)] ChartArg),
    /// Run aggregate, report and chart in sequence (default)
    Run(#[clap(flatten)] RunArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init_logging(args.verbose);
    match args.mode.unwrap_or(Mode::Run(RunArg::default())) {
        Mode::Aggregate(arg) => aggregate::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Chart(arg) => chart::run(&arg)?,
        Mode::Run(arg) => run::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let args = CommandArgs::try_parse_from(["loginstats", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_run_defaults_match_flag_defaults() {
        let args = CommandArgs::try_parse_from(["loginstats", "run"]).unwrap();
        let Some(Mode::Run(parsed)) = args.mode else {
            panic!("expected run mode");
        };
        assert_eq!(parsed, RunArg::default());
        assert_eq!(parsed.aggregate.image, Path::new(DEFAULT_IMAGE_LOG));
    }

    #[test]
    fn test_report_json_flag() {
        let args = CommandArgs::try_parse_from(["loginstats", "report", "--json"]).unwrap();
        let Some(Mode::Report(arg)) = args.mode else {
            panic!("expected report mode");
        };
        assert_eq!(arg.options.json, Some(None));

        let args =
            CommandArgs::try_parse_from(["loginstats", "report", "--json", "summary.json"])
                .unwrap();
        let Some(Mode::Report(arg)) = args.mode else {
            panic!("expected report mode");
        };
        assert_eq!(arg.options.json, Some(Some(PathBuf::from("summary.json"))));
        assert_eq!(arg.combined, Path::new(DEFAULT_COMBINED));
    }
}
