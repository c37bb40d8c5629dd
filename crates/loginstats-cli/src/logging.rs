//! Logging setup

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default filter directive.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag when set.
pub(crate) fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("loginstats started with verbosity level: {verbose}");
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
