//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over records of a CSV file, plus a loader that
//! builds a [`Ledger`] from an accounts file. Delegates CSV format concerns to
//! the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<(line, record)>`
//! for each CSV row:
//!
//! ```no_run
//! use transfer_ledger::io::csv_format::TransferCsvRecord;
//! use transfer_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::<TransferCsvRecord>::new(Path::new("transfers.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok((line, record)) => println!("line {}: {:?}", line, record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors, unreadable header) are returned
//!   from `new()`
//! - Individual record parsing errors are yielded as Err variants carrying the
//!   line number

use crate::core::Ledger;
use crate::io::csv_format::{convert_account_record, AccountCsvRecord};
use crate::types::LedgerError;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time; memory usage does not grow with the file.
#[derive(Debug)]
pub struct SyncReader<T> {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> SyncReader<T> {
    /// Open a CSV file for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, `IoError` if it
    /// cannot be opened, and `ParseError` if the header row is unreadable.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            _marker: PhantomData,
        })
    }
}

impl<T: DeserializeOwned> Iterator for SyncReader<T> {
    type Item = Result<(u64, T), LedgerError>;

    /// Get the next record from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok((line, record)))` - Successfully parsed record
    /// * `Some(Err(LedgerError))` - Parse error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
            Ok(true) => {
                let line = self.record.position().map_or(0, |pos| pos.line());
                let parsed = self
                    .record
                    .deserialize::<T>(Some(&self.headers))
                    .map(|record| (line, record))
                    .map_err(|e| LedgerError::parse_error(Some(line), e.to_string()));
                Some(parsed)
            }
        }
    }
}

/// Attach a line number to an error that was raised without one
pub fn at_line(error: LedgerError, line: u64) -> LedgerError {
    match error {
        LedgerError::ParseError { line: None, message } => LedgerError::ParseError {
            line: Some(line),
            message,
        },
        other => other,
    }
}

/// Build a ledger from an accounts CSV file (`id,name,balance`)
///
/// Registration happens before any transfer is processed, so every problem
/// here is fatal: a skipped account would turn later transfers into
/// `UnknownAccount` failures.
///
/// # Errors
///
/// Returns the first file, parse or registration error encountered.
pub fn load_ledger(path: &Path) -> Result<Ledger, LedgerError> {
    let mut ledger = Ledger::new();

    for result in SyncReader::<AccountCsvRecord>::new(path)? {
        let (line, record) = result?;
        let account = convert_account_record(record).map_err(|e| at_line(e, line))?;
        ledger.register(account.id, account.name, account.balance)?;
    }

    Ok(ledger)
}
