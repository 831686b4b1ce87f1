//! Transfer application
//!
//! Applies a single transfer request against the ledger. This is the only
//! place where two accounts are touched for one unit of work.
//!
//! A transfer is a withdraw on the source followed by a deposit on the
//! destination. Each half takes and releases its own account lock; no lock is
//! held across both halves. Consequences:
//! - Two transfers over (X, Y) and (Y, X) cannot deadlock.
//! - A self-transfer withdraws then deposits on the same account and nets to
//!   zero.
//! - Between the two halves the amount is in flight and visible in neither
//!   account. Total balance is conserved once the deposit lands.
//! - A failed withdraw never reaches the deposit, so a failed transfer leaves
//!   both accounts exactly as they were.

use crate::core::ledger::Ledger;
use crate::types::{AccountRole, LedgerError, TransferRequest};

impl Ledger {
    /// Apply a transfer request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source account is unknown (`UnknownAccount`, role `Source`)
    /// - The destination account is unknown (`UnknownAccount`, role `Destination`)
    /// - The source balance is lower than the amount (`InsufficientFunds`)
    ///
    /// In every error case no balance has changed.
    pub fn apply(&self, request: &TransferRequest) -> Result<(), LedgerError> {
        let source = self
            .lookup(request.from())
            .ok_or_else(|| LedgerError::unknown_account(AccountRole::Source, request.from()))?;
        let destination = self.lookup(request.to()).ok_or_else(|| {
            LedgerError::unknown_account(AccountRole::Destination, request.to())
        })?;

        source.withdraw(request.amount())?;
        destination.deposit(request.amount());

        Ok(())
    }
}
