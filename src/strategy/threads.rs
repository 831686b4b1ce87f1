//! Thread pool processing strategy
//!
//! Runs the pipeline on a [`WorkerPool`]: one OS thread per worker, each
//! blocking on the shared work queue. The calling thread reads the transfers
//! file and feeds the queue; it blocks whenever the queue is full.

use crate::core::{PoolConfig, WorkerPool};
use crate::strategy::{run_pipeline, ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Processing strategy backed by OS threads
///
/// # Examples
///
/// ```no_run
/// use transfer_ledger::core::PoolConfig;
/// use transfer_ledger::strategy::{ProcessingStrategy, ThreadPoolStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = ThreadPoolStrategy::new(PoolConfig::new(3, 100));
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("accounts.csv"), Path::new("transfers.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreadPoolStrategy {
    config: PoolConfig,
}

impl ThreadPoolStrategy {
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for ThreadPoolStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        run_pipeline::<WorkerPool>(accounts_path, transfers_path, &self.config, output)
    }
}
