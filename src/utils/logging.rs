// ============================================================================
// Logging Setup
// ============================================================================

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber for the venue's `tracing` output.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"` or
/// `"bond_venue=debug"`) is used. Returns false if a global subscriber was
/// already installed.
///
/// ```no_run
/// bond_venue::utils::init_logging("info");
/// ```
pub fn init_logging(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
