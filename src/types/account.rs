//! Account-related types for the transfer ledger
//!
//! This module defines the Account structure, the only shared mutable state in
//! the system. Every account guards its balance with its own lock so that
//! workers touching different accounts never contend with each other.

use super::error::LedgerError;
use parking_lot::Mutex;
use rust_decimal::Decimal;

/// Account identifier
///
/// Unique within a ledger.
pub type AccountId = String;

/// A named, individually lockable balance holder
///
/// Accounts are owned by the ledger and never copied once registered; every
/// holder of a reference observes the same balance. `deposit` and `withdraw`
/// each acquire the account lock for the duration of a single balance update
/// and release it before returning.
#[derive(Debug)]
pub struct Account {
    /// Identifier the account is registered under
    id: AccountId,

    /// Display name, informational only
    name: String,

    /// Current balance, guarded by the per-account lock
    balance: Mutex<Decimal>,
}

/// Point-in-time copy of an account, used for output
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub name: String,
    pub balance: Decimal,
}

impl Account {
    /// Create a new account with the given opening balance
    ///
    /// The ledger validates the opening balance before calling this.
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, balance: Decimal) -> Self {
        Account {
            id: id.into(),
            name: name.into(),
            balance: Mutex::new(balance),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    ///
    /// Taken under the account lock, so it never observes a torn update, but
    /// the value may be stale as soon as this returns if workers are running.
    pub fn balance(&self) -> Decimal {
        *self.balance.lock()
    }

    /// Credit `amount` to the account
    ///
    /// Callers pass non-negative amounts; transfer requests guarantee this by
    /// construction. The ledger bounds the sum of all balances at
    /// registration, so the addition cannot overflow.
    pub fn deposit(&self, amount: Decimal) {
        debug_assert!(amount >= Decimal::ZERO, "deposit of negative amount");
        let mut balance = self.balance.lock();
        *balance += amount;
    }

    /// Debit `amount` from the account
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if the balance is lower than `amount`. The
    /// balance is left unchanged in that case.
    pub fn withdraw(&self, amount: Decimal) -> Result<(), LedgerError> {
        let mut balance = self.balance.lock();
        if *balance < amount {
            return Err(LedgerError::insufficient_funds(&self.id, amount, *balance));
        }
        *balance -= amount;
        Ok(())
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            balance: self.balance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_account_holds_opening_balance() {
        let account = Account::new("alice", "Alice", Decimal::new(1000, 0));

        assert_eq!(account.id(), "alice");
        assert_eq!(account.name(), "Alice");
        assert_eq!(account.balance(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_deposit_increases_balance() {
        let account = Account::new("alice", "Alice", Decimal::new(100, 0));

        account.deposit(Decimal::new(2550, 2));

        assert_eq!(account.balance(), Decimal::new(12550, 2));
    }

    #[rstest]
    #[case::partial(100, 40, 60)]
    #[case::exact(100, 100, 0)]
    #[case::zero(100, 0, 100)]
    fn test_withdraw_succeeds_when_funds_suffice(
        #[case] opening: i64,
        #[case] amount: i64,
        #[case] expected: i64,
    ) {
        let account = Account::new("alice", "Alice", Decimal::new(opening, 0));

        assert!(account.withdraw(Decimal::new(amount, 0)).is_ok());
        assert_eq!(account.balance(), Decimal::new(expected, 0));
    }

    #[test]
    fn test_withdraw_insufficient_funds_leaves_balance_unchanged() {
        let account = Account::new("C", "Carol", Decimal::new(100, 0));

        let err = account.withdraw(Decimal::new(500, 0)).unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                id: "C".to_string(),
                requested: Decimal::new(500, 0),
                available: Decimal::new(100, 0),
            }
        );
        assert_eq!(account.balance(), Decimal::new(100, 0));
    }

    #[test]
    fn test_snapshot_copies_current_state() {
        let account = Account::new("bob", "Bob", Decimal::new(500, 0));
        account.deposit(Decimal::new(5, 0));

        let snapshot = account.snapshot();

        assert_eq!(
            snapshot,
            AccountSnapshot {
                id: "bob".to_string(),
                name: "Bob".to_string(),
                balance: Decimal::new(505, 0),
            }
        );
    }

    #[test]
    fn test_concurrent_withdrawals_never_overdraw() {
        // 10 threads each try 20 withdrawals of 1 from a balance of 50
        let account = Arc::new(Account::new("alice", "Alice", Decimal::new(50, 0)));

        let mut handles = vec![];
        for _ in 0..10 {
            let account = Arc::clone(&account);
            handles.push(thread::spawn(move || {
                let mut succeeded = 0;
                for _ in 0..20 {
                    if account.withdraw(Decimal::ONE).is_ok() {
                        succeeded += 1;
                    }
                }
                succeeded
            }));
        }

        let succeeded: i32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(succeeded, 50);
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_deposits_and_withdrawals_are_serialized() {
        let account = Arc::new(Account::new("alice", "Alice", Decimal::new(1000, 0)));

        let mut handles = vec![];
        for i in 0..8 {
            let account = Arc::clone(&account);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        account.deposit(Decimal::ONE);
                    } else {
                        account.withdraw(Decimal::ONE).unwrap();
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // 4 depositing threads and 4 withdrawing threads cancel out
        assert_eq!(account.balance(), Decimal::new(1000, 0));
    }
}
