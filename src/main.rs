//! Transfer ledger CLI
//!
//! Applies account-to-account transfers from a CSV file on a pool of
//! concurrent workers and prints the final balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --accounts accounts.csv transfers.csv > balances.csv
//! cargo run -- --accounts accounts.csv --strategy async transfers.csv > balances.csv
//! cargo run -- --accounts accounts.csv --workers 3 --queue-capacity 100 transfers.csv
//! RUST_LOG=debug cargo run -- --accounts accounts.csv transfers.csv
//! ```
//!
//! # Processing Strategies
//!
//! - **threads**: one OS thread per worker (default)
//! - **async**: one tokio task per worker on a multi-threaded runtime
//!
//! # Exit Codes
//!
//! - 0: Success (failed or rejected transfers included)
//! - 1: Fatal error (missing file, malformed accounts file, worker panic, etc.)

use std::process;
use tracing::error;
use transfer_ledger::cli;
use transfer_ledger::strategy;

fn main() {
    cli::init_logging();
    let args = cli::parse_args();

    let strategy = strategy::create_strategy(args.strategy, args.to_pool_config());

    let mut output = std::io::stdout().lock();
    if let Err(e) = strategy.process(&args.accounts_file, &args.transfers_file, &mut output) {
        error!(error = %e, "processing failed");
        process::exit(1);
    }
}
