//! CSV format handling for accounts, transfer requests and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for deserialization
//! - Conversion from CSV records to domain types
//! - Balance output serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Formats
//!
//! ```text
//! accounts:   id,name,balance
//! transfers:  from,to,amount
//! output:     id,name,balance     (sorted by id, 4 decimal places)
//! ```

use crate::types::{AccountSnapshot, LedgerError, TransferRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Opening-balance record from the accounts CSV
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountCsvRecord {
    pub id: String,
    pub name: String,
    pub balance: String,
}

/// Transfer record from the transfers CSV
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransferCsvRecord {
    pub from: String,
    pub to: String,
    pub amount: String,
}

fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| LedgerError::parse_error(None, format!("Invalid amount '{}'", raw)))
}

fn require_id(field: &str, value: String) -> Result<String, LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::parse_error(None, format!("Missing {} id", field)));
    }
    Ok(value)
}

/// Convert an AccountCsvRecord into the opening state of an account
///
/// # Errors
///
/// Returns a `ParseError` (without line information) if the id is empty or
/// the balance is not a decimal number. Negative balances are left for the
/// ledger to reject.
pub fn convert_account_record(record: AccountCsvRecord) -> Result<AccountSnapshot, LedgerError> {
    let id = require_id("account", record.id)?;
    let balance = parse_amount(&record.balance)?;

    Ok(AccountSnapshot {
        id,
        name: record.name,
        balance,
    })
}

/// Convert a TransferCsvRecord into a TransferRequest
///
/// # Errors
///
/// Returns an error if:
/// - Either account id is empty (`ParseError`)
/// - The amount is not a decimal number (`ParseError`)
/// - The amount is zero or negative (`InvalidAmount`)
pub fn convert_transfer_record(record: TransferCsvRecord) -> Result<TransferRequest, LedgerError> {
    let from = require_id("source account", record.from)?;
    let to = require_id("destination account", record.to)?;
    let amount = parse_amount(&record.amount)?;

    TransferRequest::new(from, to, amount)
}

/// Write account balances in CSV format
///
/// Writes accounts with columns: id, name, balance. Accounts are sorted by id
/// for deterministic output and balances are rendered with 4 decimal places.
///
/// # Errors
///
/// Returns an `IoError` if a write error occurred.
pub fn write_balances_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "name", "balance"])
        .map_err(|e| LedgerError::IoError {
            message: format!("Failed to write CSV header: {}", e),
        })?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id,
                account.name,
                format!("{:.4}", account.balance),
            ])
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to write account record: {}", e),
            })?;
    }

    writer.flush()?;

    Ok(())
}
