//! Processing strategy module for the transfer pipeline
//!
//! This module defines the Strategy pattern for complete processing runs,
//! encompassing accounts loading, transfer parsing, concurrent application and
//! balance output. This allows the worker pool implementation (OS threads or
//! tokio tasks) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::PoolConfig;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod pipeline;
pub mod threads;

pub use self::r#async::AsyncPoolStrategy;
pub use pipeline::run_pipeline;
pub use threads::ThreadPoolStrategy;

/// Counters describing a finished processing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Requests accepted by the work queue
    pub submitted: u64,
    /// Requests applied to the ledger
    pub succeeded: usize,
    /// Requests applied but refused by the ledger (unknown account, insufficient funds)
    pub failed: usize,
    /// Records that never became a request (malformed, non-positive amount)
    pub rejected: usize,
}

/// Processing strategy trait for complete transfer pipelines
///
/// Each strategy must be able to load the accounts file, stream the transfers
/// file into a worker pool, wait for the pool to drain and write the final
/// balances to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process transfers from `transfers_path` against the accounts in
    /// `accounts_path` and write the final balances to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either input file cannot be opened
    /// - The accounts file contains a malformed record, a duplicate id, a
    ///   negative balance or balances whose sum exceeds the decimal range
    /// - A worker panicked
    /// - Output cannot be written
    ///
    /// Malformed transfer records and failed transfers are logged and counted
    /// in the returned summary; they do not cause this method to return an
    /// error.
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The worker pool implementation to run on
/// * `config` - Worker count and queue capacity for the pool
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: PoolConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Threads => Box::new(ThreadPoolStrategy::new(config)),
        StrategyType::Async => Box::new(AsyncPoolStrategy::new(config)),
    }
}
