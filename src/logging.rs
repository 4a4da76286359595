//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// Logs go to stderr. The filter is read from `ANPR_LOG`, for example
/// `ANPR_LOG=anpr_reader=trace`; without it, `verbose` selects debug output
/// for this crate.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose {
        "anpr_reader=debug,info"
    } else {
        "anpr_reader=info,warn"
    };
    let env_filter =
        EnvFilter::try_from_env("ANPR_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_line_number(verbose),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
