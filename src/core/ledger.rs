//! Ledger module
//!
//! This module provides the `Ledger` struct, the fixed-membership directory of
//! all accounts for a processing run.
//!
//! The Ledger is responsible for:
//! - Registering accounts before processing starts
//! - Resolving account identifiers during processing
//! - Providing balance queries and sorted account listings for output
//!
//! # Registration and processing phases
//!
//! Registration takes `&mut self`; processing shares the ledger as
//! `Arc<Ledger>` and only ever needs `&self`. The borrow checker therefore
//! rules out registering accounts while workers are running, and lookups need
//! no lock because the map itself is never mutated during processing. Balance
//! mutation goes through each account's own lock.

use crate::types::{Account, AccountSnapshot, LedgerError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Directory of accounts addressed by identifier
#[derive(Debug, Default)]
pub struct Ledger {
    /// Map of account identifiers to accounts
    accounts: HashMap<String, Account>,
    /// Sum of all opening balances; no balance or partial sum can exceed it
    registered_total: Decimal,
}

impl Ledger {
    /// Create a new Ledger with no accounts
    pub fn new() -> Self {
        Ledger {
            accounts: HashMap::new(),
            registered_total: Decimal::ZERO,
        }
    }

    /// Register an account under `id` with an opening balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An account is already registered under `id`
    /// - `initial_balance` is negative
    /// - The sum of all opening balances would overflow `Decimal`
    pub fn register(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<(), LedgerError> {
        let id = id.into();

        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_balance));
        }
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::duplicate_account(&id));
        }
        let registered_total = self
            .registered_total
            .checked_add(initial_balance)
            .ok_or_else(|| LedgerError::invalid_amount(initial_balance))?;

        self.registered_total = registered_total;
        let account = Account::new(id.clone(), name, initial_balance);
        self.accounts.insert(id, account);
        Ok(())
    }

    /// Resolve an account by identifier
    pub fn lookup(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Current balance of the account registered under `id`
    ///
    /// Only meaningful as a final balance once the completion barrier has
    /// confirmed that every worker has terminated.
    pub fn balance(&self, id: &str) -> Option<Decimal> {
        self.lookup(id).map(Account::balance)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every account balance
    pub fn total_balance(&self) -> Decimal {
        self.accounts.values().map(Account::balance).sum()
    }

    /// Snapshots of all accounts sorted by identifier
    ///
    /// Sorting provides deterministic output for CSV generation.
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        let mut snapshots: Vec<AccountSnapshot> =
            self.accounts.values().map(Account::snapshot).collect();
        snapshots.sort_by(|a, b| a.id.cmp(&b.id));
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.register("A", "John", Decimal::new(1000, 0)).unwrap();
        ledger.register("B", "Linda", Decimal::new(500, 0)).unwrap();
        ledger
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();

        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.total_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_register_and_lookup() {
        let ledger = sample_ledger();

        let account = ledger.lookup("A").unwrap();
        assert_eq!(account.id(), "A");
        assert_eq!(account.name(), "John");
        assert_eq!(account.balance(), Decimal::new(1000, 0));
        assert!(ledger.contains("B"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_lookup_unknown_account() {
        let ledger = sample_ledger();

        assert!(ledger.lookup("ghost").is_none());
        assert_eq!(ledger.balance("ghost"), None);
    }

    #[test]
    fn test_register_duplicate_is_rejected() {
        let mut ledger = sample_ledger();

        let err = ledger
            .register("A", "Someone else", Decimal::new(1, 0))
            .unwrap_err();

        assert_eq!(err, LedgerError::duplicate_account("A"));
        // Original account untouched
        assert_eq!(ledger.lookup("A").unwrap().name(), "John");
        assert_eq!(ledger.balance("A"), Some(Decimal::new(1000, 0)));
    }

    #[rstest]
    #[case::zero(Decimal::ZERO, true)]
    #[case::positive(Decimal::new(1, 4), true)]
    #[case::negative(Decimal::new(-1, 4), false)]
    fn test_register_opening_balance_validation(
        #[case] balance: Decimal,
        #[case] accepted: bool,
    ) {
        let mut ledger = Ledger::new();

        let result = ledger.register("A", "John", balance);

        assert_eq!(result.is_ok(), accepted);
        assert_eq!(ledger.contains("A"), accepted);
    }

    #[test]
    fn test_register_rejects_total_overflow() {
        let mut ledger = Ledger::new();
        ledger.register("A", "John", Decimal::ONE).unwrap();

        let err = ledger.register("B", "Linda", Decimal::MAX).unwrap_err();

        assert_eq!(err, LedgerError::invalid_amount(Decimal::MAX));
        assert!(!ledger.contains("B"));
        assert_eq!(ledger.total_balance(), Decimal::ONE);

        // The rejected balance does not count against later registrations
        ledger.register("C", "Carol", Decimal::MAX - Decimal::ONE).unwrap();
        assert_eq!(ledger.total_balance(), Decimal::MAX);
    }

    #[test]
    fn test_total_balance() {
        let ledger = sample_ledger();

        assert_eq!(ledger.total_balance(), Decimal::new(1500, 0));
    }

    #[test]
    fn test_snapshots_sorted_by_id() {
        let mut ledger = Ledger::new();
        ledger.register("zed", "Zed", Decimal::new(3, 0)).unwrap();
        ledger.register("amy", "Amy", Decimal::new(1, 0)).unwrap();
        ledger.register("max", "Max", Decimal::new(2, 0)).unwrap();

        let ids: Vec<String> = ledger.snapshots().into_iter().map(|s| s.id).collect();

        assert_eq!(ids, vec!["amy", "max", "zed"]);
    }
}
