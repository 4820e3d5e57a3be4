//! `chaincode` — development host binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the in-memory ledger and the dispatcher.
//! 4. Serve JSON requests from stdin, one response line per request on stdout.

use anyhow::Result;
use tracing::info;

use chaincode::config::Config;
use chaincode::dispatch::Dispatcher;
use chaincode::ledger::MemoryLedger;
use chaincode::{host, telemetry};

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        chaincode = %cfg.chaincode_name,
        invoke_function = %cfg.invoke_function,
        "chaincode host starting"
    );

    // -----------------------------------------------------------------------
    // 3. Ledger + dispatcher
    // -----------------------------------------------------------------------
    let dispatcher = Dispatcher::new(MemoryLedger::new(), cfg.dispatch_settings());

    // -----------------------------------------------------------------------
    // 4. Serve
    // -----------------------------------------------------------------------
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    host::run(&dispatcher, stdin.lock(), stdout.lock())?;

    Ok(())
}
