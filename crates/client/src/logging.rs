//! Diagnostic logging to stderr.
//!
//! Standard output carries the report, so log lines never go there.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
