//! Logging setup for the `ldifdoc` binary.
//!
//! Logs go to stderr so stdout stays clean for the document stream. With
//! `--debug` they go to a file instead (`tail -f` to inspect).

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Map `-v` occurrences to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialise the global subscriber. `RUST_LOG` overrides `verbosity`.
pub fn init(verbosity: u8, debug_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    match debug_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;
            tracing::info!(path = %path.display(), "ldifdoc debug log started");
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;
        }
    }
    Ok(())
}
