//! The processing run shared by every strategy
//!
//! ```text
//! accounts.csv ──load_ledger──► Arc<Ledger>
//! transfers.csv ──SyncReader──► convert ──► Dispatcher ──► pool workers
//!                                  └─ rejected (logged, counted)
//! close ──► wait ──► Completion ──► failures logged ──► balances CSV
//! ```

use crate::core::{CompletionBarrier, PoolConfig, TransferPool};
use crate::io::csv_format::{convert_transfer_record, write_balances_csv, TransferCsvRecord};
use crate::io::sync_reader::{at_line, load_ledger, SyncReader};
use crate::strategy::ProcessingSummary;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Run the full pipeline on pool `P`
///
/// The accounts file is loaded completely before the first transfer is read,
/// and the balances are written only after the completion barrier returned.
///
/// # Errors
///
/// Fatal errors only: see [`crate::strategy::ProcessingStrategy::process`].
pub fn run_pipeline<P: TransferPool>(
    accounts_path: &Path,
    transfers_path: &Path,
    config: &PoolConfig,
    output: &mut dyn Write,
) -> Result<ProcessingSummary, LedgerError> {
    let ledger = Arc::new(load_ledger(accounts_path)?);
    info!(accounts = ledger.len(), total = %ledger.total_balance(), "ledger loaded");

    // Open before starting the pool so a missing file spawns no workers
    let reader = SyncReader::<TransferCsvRecord>::new(transfers_path)?;
    let (mut dispatcher, handle) = P::start(Arc::clone(&ledger), config)?;
    let mut rejected = 0;
    let mut refused = None;

    for result in reader {
        let request = result.and_then(|(line, record)| {
            convert_transfer_record(record).map_err(|e| at_line(e, line))
        });

        match request {
            Ok(request) => {
                if let Err(error) = dispatcher.submit(request) {
                    warn!(%error, submitted = dispatcher.submitted(), "stopped dispatching");
                    refused = Some(error);
                    break;
                }
            }
            Err(error) => {
                rejected += 1;
                warn!(%error, "skipping transfer record");
            }
        }
    }

    let submitted = dispatcher.close();
    let completion = handle.wait()?;
    if let Some(error) = refused {
        return Err(error);
    }

    for outcome in completion.failures() {
        if let Err(error) = &outcome.result {
            warn!(
                seq = outcome.seq,
                from = outcome.request.from(),
                to = outcome.request.to(),
                amount = %outcome.request.amount(),
                %error,
                "transfer failed"
            );
        }
    }

    let summary = ProcessingSummary {
        submitted,
        succeeded: completion.succeeded(),
        failed: completion.failed(),
        rejected,
    };
    info!(
        submitted = summary.submitted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        rejected = summary.rejected,
        "transfers processed"
    );

    write_balances_csv(&completion.ledger.snapshots(), output)?;

    Ok(summary)
}
