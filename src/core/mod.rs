//! Core business logic module
//!
//! This module contains the concurrent transfer-processing components:
//! - `ledger` - Account directory, registration and balance queries
//! - `transfer` - Transfer application (withdraw, then deposit)
//! - `queue` - Bounded multi-consumer work queue and its dispatcher
//! - `worker` - Worker loop, per-worker reports and the completion result
//! - `traits` - Trait abstractions for interchangeable worker pools
//! - `worker_pool` - Thread-based worker pool
//! - `async` - Task-based worker pool on a tokio runtime

pub mod r#async;
pub mod ledger;
pub mod queue;
pub mod traits;
pub mod transfer;
pub mod worker;
pub mod worker_pool;

pub use ledger::Ledger;
pub use queue::{work_queue, Dispatcher, QueuedTransfer, WorkReceiver};
pub use r#async::{AsyncCompletionHandle, AsyncWorkerPool};
pub use traits::{CompletionBarrier, TransferPool};
pub use worker::{Completion, PoolConfig, WorkerReport, WorkerSummary, DEFAULT_QUEUE_CAPACITY};
pub use worker_pool::{CompletionHandle, WorkerPool};

use crate::types::{LedgerError, TransferRequest};
use std::sync::Arc;

/// Apply `requests` against `ledger` on a pool of `workers` threads
///
/// Starts the pool, enqueues every request, closes the queue and returns the
/// completion handle. Call [`CompletionBarrier::wait`] on it before reading
/// final balances.
///
/// # Errors
///
/// Returns an error if the worker threads could not be spawned.
pub fn submit_all(
    ledger: Arc<Ledger>,
    requests: Vec<TransferRequest>,
    workers: usize,
) -> Result<CompletionHandle, LedgerError> {
    let capacity = requests.len().clamp(1, DEFAULT_QUEUE_CAPACITY);
    WorkerPool::submit_all(ledger, requests, &PoolConfig::new(workers, capacity))
}
