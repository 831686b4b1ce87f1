//! Worker-side building blocks shared by the thread and task pools
//!
//! Every worker, whatever it runs on, executes the same loop:
//!
//! ```text
//! Idle ──next request──► Processing(request) ──apply + record──► Idle
//! Idle ──queue closed and drained──► Terminated
//! ```
//!
//! A failed transfer is recorded as that request's outcome and the worker moves
//! on to the next one. Only a closed, empty queue terminates a worker.

use crate::core::ledger::Ledger;
use crate::core::queue::QueuedTransfer;
use crate::types::{TransferOutcome, TransferSeq};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of pending requests the work queue holds
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Configuration for a worker pool
///
/// Controls the number of concurrent workers and how many requests may wait in
/// the work queue before the dispatcher blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolConfig {
    /// Number of concurrent workers
    pub workers: usize,
    /// Maximum number of requests waiting in the work queue
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// Create a new PoolConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        let default = Self::default();

        let workers = if workers == 0 {
            warn!(
                workers,
                default = default.workers,
                "invalid worker count, using default"
            );
            default.workers
        } else {
            workers
        };

        let queue_capacity = if queue_capacity == 0 {
            warn!(
                queue_capacity,
                default = default.queue_capacity,
                "invalid queue capacity, using default"
            );
            default.queue_capacity
        } else {
            queue_capacity
        };

        Self {
            workers,
            queue_capacity,
        }
    }
}

/// Per-worker counters reported once the worker has terminated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    /// Index of the worker within its pool
    pub worker: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Everything a worker produced over its lifetime
#[derive(Debug, Default)]
pub struct WorkerReport {
    pub summary: WorkerSummary,
    pub outcomes: Vec<TransferOutcome>,
}

impl WorkerReport {
    pub fn new(worker: usize) -> Self {
        Self {
            summary: WorkerSummary {
                worker,
                ..WorkerSummary::default()
            },
            outcomes: Vec::new(),
        }
    }

    /// Apply one queued transfer and record its outcome
    ///
    /// Failures are recorded, never propagated: the worker keeps consuming.
    pub fn process(&mut self, ledger: &Ledger, job: QueuedTransfer) {
        let QueuedTransfer { seq, request } = job;
        let worker = self.summary.worker;
        let result = ledger.apply(&request);

        match &result {
            Ok(()) => {
                self.summary.succeeded += 1;
                debug!(
                    worker,
                    seq,
                    from = request.from(),
                    to = request.to(),
                    amount = %request.amount(),
                    "transfer applied"
                );
            }
            Err(error) => {
                self.summary.failed += 1;
                debug!(worker, seq, %error, "transfer rejected");
            }
        }

        self.outcomes.push(TransferOutcome {
            seq,
            request,
            result,
        });
    }
}

/// Result of a finished run, handed back by the completion barrier
///
/// By the time a `Completion` exists every worker has terminated, so the
/// ledger balances are final.
#[derive(Debug)]
pub struct Completion {
    /// The ledger the transfers were applied to
    pub ledger: Arc<Ledger>,

    /// One outcome per submitted request, sorted by sequence number
    pub outcomes: Vec<TransferOutcome>,

    /// Per-worker counters, sorted by worker index
    pub workers: Vec<WorkerSummary>,
}

impl Completion {
    /// Merge the reports of every terminated worker
    pub fn from_reports(ledger: Arc<Ledger>, reports: Vec<WorkerReport>) -> Self {
        let mut outcomes = Vec::new();
        let mut workers = Vec::with_capacity(reports.len());

        for report in reports {
            outcomes.extend(report.outcomes);
            workers.push(report.summary);
        }

        outcomes.sort_by_key(|outcome| outcome.seq);
        workers.sort_by_key(|summary| summary.worker);

        Self {
            ledger,
            outcomes,
            workers,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Outcomes of the requests that failed, in submission order
    pub fn failures(&self) -> impl Iterator<Item = &TransferOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Outcome of the request submitted at position `seq`
    pub fn outcome(&self, seq: TransferSeq) -> Option<&TransferOutcome> {
        self.outcomes
            .binary_search_by_key(&seq, |o| o.seq)
            .ok()
            .map(|index| &self.outcomes[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LedgerError, TransferRequest};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.register("A", "John", Decimal::new(100, 0)).unwrap();
        ledger.register("B", "Linda", Decimal::new(0, 0)).unwrap();
        ledger
    }

    fn job(seq: TransferSeq, from: &str, to: &str, amount: i64) -> QueuedTransfer {
        QueuedTransfer {
            seq,
            request: TransferRequest::new(from, to, Decimal::new(amount, 0)).unwrap(),
        }
    }

    #[rstest]
    #[case::defaults(0, 0, num_cpus::get(), DEFAULT_QUEUE_CAPACITY)]
    #[case::custom(3, 16, 3, 16)]
    #[case::zero_workers(0, 16, num_cpus::get(), 16)]
    #[case::zero_capacity(3, 0, 3, DEFAULT_QUEUE_CAPACITY)]
    fn test_pool_config_new(
        #[case] workers: usize,
        #[case] capacity: usize,
        #[case] expected_workers: usize,
        #[case] expected_capacity: usize,
    ) {
        let config = PoolConfig::new(workers, capacity);

        assert_eq!(config.workers, expected_workers);
        assert_eq!(config.queue_capacity, expected_capacity);
    }

    #[test]
    fn test_report_records_success_and_failure_and_keeps_going() {
        let ledger = ledger();
        let mut report = WorkerReport::new(7);

        report.process(&ledger, job(0, "A", "B", 60));
        report.process(&ledger, job(1, "A", "B", 60)); // only 40 left
        report.process(&ledger, job(2, "ghost", "B", 1));
        report.process(&ledger, job(3, "A", "B", 40));

        assert_eq!(
            report.summary,
            WorkerSummary {
                worker: 7,
                succeeded: 2,
                failed: 2
            }
        );
        assert_eq!(report.outcomes.len(), 4);
        assert!(matches!(
            report.outcomes[1].result,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            report.outcomes[2].result,
            Err(LedgerError::UnknownAccount { .. })
        ));
        assert_eq!(ledger.balance("A"), Some(Decimal::ZERO));
        assert_eq!(ledger.balance("B"), Some(Decimal::new(100, 0)));
    }

    #[test]
    fn test_completion_merges_and_sorts_reports() {
        let ledger = Arc::new(ledger());
        let mut first = WorkerReport::new(1);
        let mut second = WorkerReport::new(0);

        second.process(&ledger, job(2, "A", "B", 1));
        first.process(&ledger, job(0, "A", "B", 1));
        second.process(&ledger, job(1, "ghost", "B", 1));

        let completion = Completion::from_reports(Arc::clone(&ledger), vec![first, second]);

        let seqs: Vec<TransferSeq> = completion.outcomes.iter().map(|o| o.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(completion.workers[0].worker, 0);
        assert_eq!(completion.workers[1].worker, 1);
        assert_eq!(completion.succeeded(), 2);
        assert_eq!(completion.failed(), 1);
        assert_eq!(completion.failures().next().map(|o| o.seq), Some(1));
        assert!(completion.outcome(2).unwrap().is_success());
        assert!(completion.outcome(3).is_none());
    }
}
