//! Error types for ledger loading and balance queries.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while loading a ledger or querying balances.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level error: unreadable row or wrong field count
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A row had a malformed date or value field
    #[error("Invalid transaction at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// An ending-date argument that is not a calendar date
    #[error("Invalid ending date {text:?}: expected YYYY-MM-DD")]
    InvalidEndingDate { text: String },

    /// Missing input file argument
    #[error(
        "Missing input file argument. Usage: ledger-engine <transactions.csv> \
         [--account NAME] [--until YYYY-MM-DD] [--by-day]"
    )]
    MissingArgument,

    /// Unrecognized flag, extra positional argument, or flag without a value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::convert::Infallible> for LedgerError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
