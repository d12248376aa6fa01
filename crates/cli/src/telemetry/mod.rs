//! Logging for the `strcipher` command.
//!
//! stdout is reserved for the envelope or plaintext the command prints, so
//! log lines are JSON on stderr. Only scheme names, lengths and error codes
//! are logged by this workspace.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the JSON subscriber. `RUST_LOG` wins over `log_level` when set.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install strcipher log subscriber: {e}"))
}

