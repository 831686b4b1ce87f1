//! Task-based worker pool on a multi-threaded tokio runtime
//!
//! This module provides `AsyncWorkerPool`, which runs each worker as a tokio
//! task instead of an OS thread. The pool owns its runtime; the runtime is
//! built with one worker thread per pool worker so the degree of parallelism
//! matches the thread pool.
//!
//! # Architecture
//!
//! ```text
//! AsyncWorkerPool
//!     ├── tokio Runtime (worker_threads = config.workers)
//!     ├── Dispatcher ──► bounded queue ──► N worker tasks
//!     └── AsyncCompletionHandle (runtime + task JoinHandles)
//! ```
//!
//! The caller stays synchronous: submitting blocks the calling thread and
//! `wait` drives the runtime with `block_on` until every task has finished.

use crate::core::ledger::Ledger;
use crate::core::queue::{work_queue, Dispatcher, WorkReceiver};
use crate::core::traits::{CompletionBarrier, TransferPool};
use crate::core::worker::{Completion, PoolConfig, WorkerReport};
use crate::types::LedgerError;
use futures::future::join_all;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Worker pool backed by tokio tasks
#[derive(Debug, Clone, Copy)]
pub struct AsyncWorkerPool;

impl TransferPool for AsyncWorkerPool {
    type Handle = AsyncCompletionHandle;

    fn start(
        ledger: Arc<Ledger>,
        config: &PoolConfig,
    ) -> Result<(Dispatcher, AsyncCompletionHandle), LedgerError> {
        // Without a worker nothing would ever drain the queue
        let worker_count = config.workers.max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_count)
            .thread_name("transfer-worker")
            .build()?;

        let (dispatcher, receiver) = work_queue(config.queue_capacity);

        let workers = (0..worker_count)
            .map(|worker| {
                let ledger = Arc::clone(&ledger);
                let receiver = receiver.clone();
                runtime.spawn(run_worker(worker, ledger, receiver))
            })
            .collect();

        debug!(
            workers = worker_count,
            capacity = config.queue_capacity,
            "async worker pool started"
        );

        Ok((
            dispatcher,
            AsyncCompletionHandle {
                runtime,
                ledger,
                workers,
            },
        ))
    }
}

async fn run_worker(worker: usize, ledger: Arc<Ledger>, receiver: WorkReceiver) -> WorkerReport {
    let mut report = WorkerReport::new(worker);

    while let Some(job) = receiver.next().await {
        report.process(&ledger, job);
    }

    debug!(worker, "worker task terminated");
    report
}

/// Completion barrier for an [`AsyncWorkerPool`]
///
/// Owns the runtime; it is shut down once `wait` returns.
#[derive(Debug)]
pub struct AsyncCompletionHandle {
    runtime: Runtime,
    ledger: Arc<Ledger>,
    workers: Vec<JoinHandle<WorkerReport>>,
}

impl CompletionBarrier for AsyncCompletionHandle {
    fn wait(self) -> Result<Completion, LedgerError> {
        let results = self.runtime.block_on(join_all(self.workers));

        let mut reports = Vec::with_capacity(results.len());
        let mut panicked = None;

        for (worker, result) in results.into_iter().enumerate() {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!(worker, error = %e, "worker task panicked");
                    panicked.get_or_insert(worker);
                }
            }
        }

        match panicked {
            Some(worker) => Err(LedgerError::WorkerPanicked { worker }),
            None => Ok(Completion::from_reports(self.ledger, reports)),
        }
    }
}
