// src/logging.rs
// =============================================================================
// Structured logging to stderr.
//
// stdout is reserved for results (the summary table, JSON reports, tool
// output), so progress and warnings go to stderr. RUST_LOG overrides the
// default level.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "info,site_mirror=debug"
    } else {
        "info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
