use std::path::{Path, PathBuf};

use anyhow::Context;
use loginstats_analysis::{
    aggregate::{UserStats, aggregate_sessions},
    combined::{CombinedTable, Scheme},
    event,
    session::pair_sessions,
};
use tracing::{debug, info};

use super::{DEFAULT_COMBINED, DEFAULT_IMAGE_LOG, DEFAULT_TEXT_LOG};

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct AggregateArg {
    /// Event log of the Image21 scheme
    #[arg(long, default_value = DEFAULT_IMAGE_LOG)]
    pub image: PathBuf,
    /// Event log of the Text21 scheme
    #[arg(long, default_value = DEFAULT_TEXT_LOG)]
    pub text: PathBuf,
    /// Path of the combined per-user table to write
    #[arg(long, default_value = DEFAULT_COMBINED)]
    pub output: PathBuf,
}

impl Default for AggregateArg {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE_LOG.into(),
            text: DEFAULT_TEXT_LOG.into(),
            output: DEFAULT_COMBINED.into(),
        }
    }
}

impl AggregateArg {
    fn logs(&self) -> [(Scheme, &Path); 2] {
        [
            (Scheme::Image21, self.image.as_path()),
            (Scheme::Text21, self.text.as_path()),
        ]
    }
}

pub(crate) fn run(arg: &AggregateArg) -> anyhow::Result<()> {
    let table = build_combined_table(arg)?;
    write_combined_table(&table, &arg.output)
}

/// Loads both event logs and merges their per-user statistics.
pub(crate) fn build_combined_table(arg: &AggregateArg) -> anyhow::Result<CombinedTable> {
    let tables = arg
        .logs()
        .into_iter()
        .map(|(scheme, path)| aggregate_log(scheme, path).map(|stats| (scheme, stats)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CombinedTable::combine(tables))
}

pub(crate) fn write_combined_table(table: &CombinedTable, path: &Path) -> anyhow::Result<()> {
    table
        .write_path(path)
        .with_context(|| format!("Failed to write combined table: {}", path.display()))?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn aggregate_log(scheme: Scheme, path: &Path) -> anyhow::Result<Vec<UserStats>> {
    info!("Loading {scheme} events from {}", path.display());
    let events = event::load_events_file(path)
        .with_context(|| format!("Failed to load {scheme} event log: {}", path.display()))?;
    debug!("{scheme}: {} session-start and login events", events.len());

    let sessions = pair_sessions(events);
    debug!("{scheme}: {} paired sessions", sessions.len());

    let stats = aggregate_sessions(sessions);
    info!("{scheme}: statistics for {} users", stats.len());
    Ok(stats)
}
