//! Structured logging: tracing subscriber initialisation.
//!
//! # Logging invariants
//!
//! - **No stored values or key material** appear in any log field. Ledger keys
//!   and payload lengths are fine.
//! - Log level is configurable via `CHAINCODE_LOG_LEVEL` (default: `info`),
//!   overridden by `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// Outputs structured JSON logs to stderr at `log_level`, unless `RUST_LOG`
/// is set. Stdout is reserved for host responses.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
