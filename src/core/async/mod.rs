//! Asynchronous implementations of core components
//!
//! This module provides the task-based worker pool. It shares the work queue,
//! the ledger and the outcome types with the thread-based pool and differs
//! only in what a worker runs on.
//!
//! # Thread Safety
//!
//! Tasks are spread over the runtime's worker threads:
//! - Operations on different accounts proceed in parallel
//! - Operations on the same account are serialized by the account lock
//! - No global locks - fine-grained locking per account

pub mod worker_pool;

pub use worker_pool::{AsyncCompletionHandle, AsyncWorkerPool};
