//! Bounded work queue shared by the worker pools
//!
//! The queue is a bounded tokio `mpsc` channel. The single receiver sits
//! behind a `tokio::sync::Mutex` so that any number of workers can consume
//! from it: whichever worker holds the lock takes the next request in FIFO
//! order. Thread workers use the blocking calls, task workers `.await` them.
//!
//! # Architecture
//!
//! ```text
//! Dispatcher ──submit──► [ bounded channel ] ──next──► WorkReceiver (cloned per worker)
//! ```
//!
//! The [`Dispatcher`] assigns submission sequence numbers and closes the queue
//! when it is closed or dropped. Once closed and drained, every `next` call
//! returns `None` and workers terminate.

use crate::types::{LedgerError, TransferRequest, TransferSeq};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// A transfer request tagged with its submission position
#[derive(Debug, Clone)]
pub struct QueuedTransfer {
    pub seq: TransferSeq,
    pub request: TransferRequest,
}

/// Create a bounded work queue holding at most `capacity` pending requests
///
/// A capacity of zero is raised to one.
pub fn work_queue(capacity: usize) -> (Dispatcher, WorkReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));

    let dispatcher = Dispatcher {
        sender,
        next_seq: 0,
    };
    let receiver = WorkReceiver {
        inner: Arc::new(Mutex::new(receiver)),
    };

    (dispatcher, receiver)
}

/// Producer side of the work queue
///
/// Feeds transfer requests to the workers. Closing the dispatcher (explicitly
/// or by dropping it) closes the queue; workers finish the remaining requests
/// and terminate.
///
/// Submission blocks the calling thread, so it must not be called from inside
/// an async execution context.
#[derive(Debug)]
pub struct Dispatcher {
    sender: mpsc::Sender<QueuedTransfer>,
    next_seq: TransferSeq,
}

impl Dispatcher {
    /// Enqueue a transfer request
    ///
    /// Blocks while the queue is full.
    ///
    /// # Returns
    ///
    /// The sequence number assigned to the request.
    ///
    /// # Errors
    ///
    /// Returns `QueueClosed` if every worker has already gone away.
    pub fn submit(&mut self, request: TransferRequest) -> Result<TransferSeq, LedgerError> {
        let seq = self.next_seq;

        self.sender
            .blocking_send(QueuedTransfer { seq, request })
            .map_err(|_| LedgerError::QueueClosed)?;

        self.next_seq += 1;
        Ok(seq)
    }

    /// Number of requests accepted so far
    pub fn submitted(&self) -> TransferSeq {
        self.next_seq
    }

    /// Close the queue
    ///
    /// # Returns
    ///
    /// The total number of requests that were submitted.
    pub fn close(self) -> TransferSeq {
        self.next_seq
    }
}

/// Consumer side of the work queue
///
/// Cheap to clone; every clone consumes from the same queue and each request
/// is delivered to exactly one of them.
#[derive(Debug, Clone)]
pub struct WorkReceiver {
    inner: Arc<Mutex<mpsc::Receiver<QueuedTransfer>>>,
}

impl WorkReceiver {
    /// Take the next request, blocking the current thread while the queue is
    /// empty but still open
    ///
    /// Returns `None` once the queue is closed and drained.
    pub fn next_blocking(&self) -> Option<QueuedTransfer> {
        self.inner.blocking_lock().blocking_recv()
    }

    /// Take the next request, suspending the current task while the queue is
    /// empty but still open
    ///
    /// Returns `None` once the queue is closed and drained.
    pub async fn next(&self) -> Option<QueuedTransfer> {
        self.inner.lock().await.recv().await
    }
}
