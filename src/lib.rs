//! Transfer Ledger Library
//! # Overview
//!
//! This library applies account-to-account transfer requests against an
//! in-memory ledger using a fixed pool of concurrent workers fed by a bounded
//! work queue. Two interchangeable pools are provided: OS threads and tokio
//! tasks.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, TransferRequest, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing and logging setup
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account registration and balance queries
//!   - [`core::transfer`] - Applying one transfer (withdraw, then deposit)
//!   - [`core::queue`] - Bounded work queue and its dispatcher
//!   - [`core::worker_pool`] / [`core::async`] - The two worker pools
//! - [`io`] - CSV input and balance output
//! - [`strategy`] - End-to-end processing pipelines
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//! use transfer_ledger::{submit_all, CompletionBarrier, Ledger, TransferRequest};
//!
//! let mut ledger = Ledger::new();
//! ledger.register("A", "John", Decimal::new(1000, 0)).unwrap();
//! ledger.register("B", "Linda", Decimal::new(500, 0)).unwrap();
//!
//! let requests = vec![
//!     TransferRequest::new("A", "B", Decimal::new(200, 0)).unwrap(),
//!     TransferRequest::new("B", "A", Decimal::new(50, 0)).unwrap(),
//! ];
//!
//! let completion = submit_all(Arc::new(ledger), requests, 3).unwrap().wait().unwrap();
//!
//! assert_eq!(completion.ledger.balance("A"), Some(Decimal::new(850, 0)));
//! assert_eq!(completion.ledger.balance("B"), Some(Decimal::new(650, 0)));
//! ```
//!
//! # Concurrency Model
//!
//! Each account carries its own lock and a transfer holds at most one lock at
//! a time, so transfers between disjoint accounts run in parallel and no lock
//! ordering is needed. A transfer is not atomic across its two accounts; the
//! total balance is conserved once the completion barrier has returned.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    submit_all, AsyncWorkerPool, Completion, CompletionBarrier, CompletionHandle, Ledger,
    PoolConfig, TransferPool, WorkerPool,
};
pub use io::write_balances_csv;
pub use types::{
    Account, AccountId, AccountRole, AccountSnapshot, LedgerError, TransferOutcome,
    TransferRequest, TransferSeq,
};
