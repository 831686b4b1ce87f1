//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account and its balance operations
//! - `transfer`: Transfer requests and their outcomes
//! - `error`: Error types for the transfer ledger

pub mod account;
pub mod error;
pub mod transfer;

pub use account::{Account, AccountId, AccountSnapshot};
pub use error::{AccountRole, LedgerError};
pub use transfer::{TransferOutcome, TransferRequest, TransferSeq};
