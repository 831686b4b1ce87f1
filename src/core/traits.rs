//! Core traits for worker pools and their completion barriers
//!
//! This module defines the trait abstractions that allow the thread-based and
//! the task-based worker pools to be used interchangeably.

use crate::core::ledger::Ledger;
use crate::core::queue::Dispatcher;
use crate::core::worker::{Completion, PoolConfig};
use crate::types::{LedgerError, TransferRequest};
use std::sync::Arc;
use tracing::warn;

/// Synchronization point proving all workers have finished
pub trait CompletionBarrier {
    /// Block until every worker has observed queue closure and finished any
    /// in-flight request
    ///
    /// The queue's dispatcher must have been closed (or dropped) first,
    /// otherwise the workers never terminate.
    ///
    /// # Errors
    ///
    /// Returns `WorkerPanicked` if a worker did not terminate normally. Every
    /// other worker has still been waited for.
    fn wait(self) -> Result<Completion, LedgerError>;
}

/// A fixed-size pool of workers applying transfers against a ledger
pub trait TransferPool {
    /// Handle used to wait for the pool to drain
    type Handle: CompletionBarrier;

    /// Start the workers and return the queue's dispatcher together with the
    /// completion handle
    ///
    /// # Errors
    ///
    /// Returns an error if the workers could not be spawned.
    fn start(
        ledger: Arc<Ledger>,
        config: &PoolConfig,
    ) -> Result<(Dispatcher, Self::Handle), LedgerError>;

    /// Start the pool, enqueue every request, close the queue and return the
    /// completion handle
    ///
    /// Enqueueing happens on the calling thread and blocks while the queue is
    /// full, so this returns once the last request has been accepted by the
    /// queue, not once it has been applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the workers could not be spawned, or if the queue
    /// refused a request because every worker had already terminated. In the
    /// latter case the workers are joined first and a `WorkerPanicked` error
    /// takes precedence over `QueueClosed`.
    fn submit_all(
        ledger: Arc<Ledger>,
        requests: Vec<TransferRequest>,
        config: &PoolConfig,
    ) -> Result<Self::Handle, LedgerError> {
        let (mut dispatcher, handle) = Self::start(ledger, config)?;

        for request in requests {
            if let Err(error) = dispatcher.submit(request) {
                warn!(%error, submitted = dispatcher.submitted(), "stopped dispatching");
                dispatcher.close();
                handle.wait()?;
                return Err(error);
            }
        }
        dispatcher.close();

        Ok(handle)
    }
}
