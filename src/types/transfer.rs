//! Transfer-related types for the transfer ledger
//!
//! This module defines transfer requests, the unit of work consumed by the
//! worker pool, and the outcome recorded for each one.

use super::account::AccountId;
use super::error::LedgerError;
use rust_decimal::Decimal;

/// Position of a request in submission order, assigned by the dispatcher
pub type TransferSeq = u64;

/// One instruction to move a positive amount from one account to another
///
/// Immutable once created. The amount is validated on construction, so a
/// request that reaches a worker always carries a strictly positive amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    from: AccountId,
    to: AccountId,
    amount: Decimal,
}

impl TransferRequest {
    /// Create a new transfer request
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount` is zero or negative.
    pub fn new(
        from: impl Into<AccountId>,
        to: impl Into<AccountId>,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        Ok(TransferRequest {
            from: from.into(),
            to: to.into(),
            amount,
        })
    }

    /// Source account identifier
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination account identifier
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Whether source and destination are the same account
    pub fn is_self_transfer(&self) -> bool {
        self.from == self.to
    }
}

/// Result of applying a single transfer request
///
/// Contains the request, its submission sequence number and the result of
/// applying it. Exactly one outcome is recorded per submitted request.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Submission position of the request
    pub seq: TransferSeq,

    /// The request that was applied
    pub request: TransferRequest,

    /// The result of applying it (success or a request-scoped error)
    pub result: Result<(), LedgerError>,
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
