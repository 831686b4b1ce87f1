//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Streaming CSV reader and the accounts-file loader

pub mod csv_format;
pub mod sync_reader;

pub use csv_format::{
    convert_account_record, convert_transfer_record, write_balances_csv, AccountCsvRecord,
    TransferCsvRecord,
};
pub use sync_reader::{at_line, load_ledger, SyncReader};
