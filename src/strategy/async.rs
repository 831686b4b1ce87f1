//! Tokio task processing strategy
//!
//! Runs the pipeline on an [`AsyncWorkerPool`]: every worker is a task on a
//! multi-threaded runtime owned by the pool.
//!
//! # Architecture
//!
//! ```text
//! AsyncPoolStrategy
//!     ├── PoolConfig (workers, queue_capacity)
//!     ├── SyncReader (transfers CSV, on the calling thread)
//!     └── AsyncWorkerPool
//!         ├── tokio Runtime (worker_threads = workers)
//!         └── N worker tasks sharing Arc<Ledger>
//! ```

use crate::core::{AsyncWorkerPool, PoolConfig};
use crate::strategy::{run_pipeline, ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Processing strategy backed by tokio tasks
#[derive(Debug, Clone, Default)]
pub struct AsyncPoolStrategy {
    config: PoolConfig,
}

impl AsyncPoolStrategy {
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncPoolStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        run_pipeline::<AsyncWorkerPool>(accounts_path, transfers_path, &self.config, output)
    }
}
