use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &["examgrid", "examgrid_core", "examgrid_client", "examgrid_report"];

/// Initialize tracing on stderr.
///
/// - 0 (none) -> info
/// - 1 (-v)   -> debug
/// - 2+ (-vv) -> trace
///
/// `RUST_LOG` overrides the flag when set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let default_filter = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
