//! Thread-based worker pool
//!
//! Runs a fixed number of OS threads, each executing the worker loop against
//! a shared `Arc<Ledger>` and a clone of the work queue's receiver. A worker
//! blocks while the queue is empty and open, and exits once the queue is
//! closed and drained.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//! use transfer_ledger::core::{CompletionBarrier, Ledger, PoolConfig, TransferPool, WorkerPool};
//! use transfer_ledger::types::TransferRequest;
//!
//! let mut ledger = Ledger::new();
//! ledger.register("A", "John", Decimal::new(1000, 0)).unwrap();
//! ledger.register("B", "Linda", Decimal::new(500, 0)).unwrap();
//!
//! let requests = vec![TransferRequest::new("A", "B", Decimal::new(200, 0)).unwrap()];
//! let handle = WorkerPool::submit_all(Arc::new(ledger), requests, &PoolConfig::new(3, 16)).unwrap();
//! let completion = handle.wait().unwrap();
//!
//! assert_eq!(completion.ledger.balance("B"), Some(Decimal::new(700, 0)));
//! ```

use crate::core::ledger::Ledger;
use crate::core::queue::{work_queue, Dispatcher, WorkReceiver};
use crate::core::traits::{CompletionBarrier, TransferPool};
use crate::core::worker::{Completion, PoolConfig, WorkerReport};
use crate::types::LedgerError;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Worker pool backed by OS threads
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool;

impl TransferPool for WorkerPool {
    type Handle = CompletionHandle;

    fn start(
        ledger: Arc<Ledger>,
        config: &PoolConfig,
    ) -> Result<(Dispatcher, CompletionHandle), LedgerError> {
        let (dispatcher, receiver) = work_queue(config.queue_capacity);
        // Without a worker nothing would ever drain the queue
        let worker_count = config.workers.max(1);

        let mut workers = Vec::with_capacity(worker_count);
        for worker in 0..worker_count {
            let ledger = Arc::clone(&ledger);
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("transfer-worker-{worker}"))
                .spawn(move || run_worker(worker, &ledger, &receiver))?;
            workers.push(handle);
        }

        debug!(
            workers = worker_count,
            capacity = config.queue_capacity,
            "worker pool started"
        );

        Ok((dispatcher, CompletionHandle { ledger, workers }))
    }
}

fn run_worker(worker: usize, ledger: &Ledger, receiver: &WorkReceiver) -> WorkerReport {
    let mut report = WorkerReport::new(worker);

    while let Some(job) = receiver.next_blocking() {
        report.process(ledger, job);
    }

    debug!(worker, "worker terminated");
    report
}

/// Completion barrier for a [`WorkerPool`]
#[derive(Debug)]
pub struct CompletionHandle {
    ledger: Arc<Ledger>,
    workers: Vec<JoinHandle<WorkerReport>>,
}

impl CompletionBarrier for CompletionHandle {
    fn wait(self) -> Result<Completion, LedgerError> {
        let mut reports = Vec::with_capacity(self.workers.len());
        let mut panicked = None;

        for (worker, handle) in self.workers.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    error!(worker, "worker panicked");
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
