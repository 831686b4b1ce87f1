//! Error types for the transfer ledger
//!
//! This module defines all error types that can occur while loading accounts,
//! reading transfer requests and applying them against the ledger.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid amounts, etc.
//! - **Registration Errors**: Duplicate account identifiers
//! - **Transfer Errors**: Unknown accounts, insufficient funds, invalid amounts
//! - **Pool Errors**: Submitting after the queue closed, panicked workers

use super::account::AccountId;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Which side of a transfer an account identifier was resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    /// The account funds are withdrawn from
    Source,
    /// The account funds are deposited into
    Destination,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Source => f.write_str("source"),
            AccountRole::Destination => f.write_str("destination"),
        }
    }
}

/// Main error type for the transfer ledger
///
/// Each variant includes enough context to explain the failure in a log line.
/// Request-scoped variants (see [`LedgerError::is_request_scoped`]) terminate
/// only the offending transfer; the rest are fatal to the run that produced them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable for transfer records (the record is skipped), fatal for the
    /// accounts file.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// An account with the same identifier is already registered
    #[error("Account {id} is already registered")]
    DuplicateAccount {
        /// The duplicated identifier
        id: AccountId,
    },

    /// A transfer amount that is not strictly positive, or a negative
    /// opening balance
    #[error("Invalid amount {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A transfer references an identifier not present in the ledger
    ///
    /// Non-retryable: the request is simply invalid.
    #[error("Unknown {which} account {id}")]
    UnknownAccount {
        /// Whether the source or the destination was missing
        which: AccountRole,
        /// The identifier that could not be resolved
        id: AccountId,
    },

    /// A withdraw would drive the balance negative
    ///
    /// The account is left unchanged. Non-retryable: there is no overdraft and
    /// no queuing for funds.
    #[error("Insufficient funds in account {id}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Account that was debited
        id: AccountId,
        /// Requested withdrawal amount
        requested: Decimal,
        /// Balance at the time of the withdraw
        available: Decimal,
    },

    /// A transfer was submitted after the work queue was closed
    #[error("Work queue is closed")]
    QueueClosed,

    /// A worker panicked before draining the queue
    #[error("Worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the worker within its pool
        worker: usize,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an UnknownAccount error
    pub fn unknown_account(which: AccountRole, id: &str) -> Self {
        LedgerError::UnknownAccount {
            which,
            id: id.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: &str, requested: Decimal, available: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            id: id.to_string(),
            requested,
            available,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(id: &str) -> Self {
        LedgerError::DuplicateAccount { id: id.to_string() }
    }

    /// Create a ParseError with an optional line number
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Whether this error only terminates a single transfer request
    ///
    /// Request-scoped errors are recorded as that request's outcome and never
    /// stop a worker or the pool.
    pub fn is_request_scoped(&self) -> bool {
        matches!(
            self,
            LedgerError::UnknownAccount { .. }
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::InvalidAmount { .. }
        )
    }
}
