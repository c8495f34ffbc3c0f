//! Transaction models for CSV parsing and internal representation.

use crate::error::LedgerError;
use crate::money::Money;
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Display currency symbol applied when a record carries none of its own.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "§";

/// Date format for transaction dates and ending-date arguments.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw transaction row as read from CSV.
///
/// Rows are headerless and positional: date, source, destination, value.
/// All fields are read as text and validated in [`TransactionRecord::parse`].
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date (`YYYY-MM-DD`)
    pub date: String,

    /// Account the value moves out of
    pub source: String,

    /// Account the value moves into
    pub destination: String,

    /// Decimal amount as text, e.g. `"125.00"`
    pub value: String,
}

impl TransactionRecord {
    /// Validates the raw row into a [`Transaction`].
    ///
    /// `row` is the 1-indexed row number reported in error messages.
    pub fn parse(&self, row: usize) -> Result<Transaction, LedgerError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|e| {
            LedgerError::InvalidRecord {
                row,
                message: format!("malformed date {:?}: {}", self.date, e),
            }
        })?;

        let value = Money::from_str(self.value.trim()).map_err(|e| LedgerError::InvalidRecord {
            row,
            message: format!("malformed value {:?}: {}", self.value, e),
        })?;

        Ok(Transaction::new(
            date,
            self.source.trim(),
            self.destination.trim(),
            value,
        ))
    }
}

/// A dated double-entry transfer between two accounts.
///
/// Immutable once constructed. Ordering is structural over
/// (date, source, destination, value, currency_symbol), giving the ledger
/// a canonical sort: same-day transactions order by account name and
/// value, not by real-world sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Calendar date, no time component
    pub date: NaiveDate,

    /// Account debited by `value`
    pub source: String,

    /// Account credited by `value`
    pub destination: String,

    /// Transferred amount, non-negative by convention
    pub value: Money,

    /// Display-only currency marker; never used in arithmetic
    pub currency_symbol: String,
}

impl Transaction {
    /// Creates a transaction with the default currency symbol.
    pub fn new(
        date: NaiveDate,
        source: impl Into<String>,
        destination: impl Into<String>,
        value: Money,
    ) -> Self {
        Transaction {
            date,
            source: source.into(),
            destination: destination.into(),
            value,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Replaces the display currency symbol.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}

impl Ord for Transaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.destination.cmp(&other.destination))
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| self.currency_symbol.cmp(&other.currency_symbol))
    }
}

impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:-{}{} {}:+{}{}",
            self.date,
            self.source,
            self.currency_symbol,
            self.value,
            self.destination,
            self.currency_symbol,
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_record() {
        let record = TransactionRecord {
            date: "2015-01-16".to_string(),
            source: "john".to_string(),
            destination: "mary".to_string(),
            value: "125.00".to_string(),
        };

        let tx = record.parse(1).unwrap();
        assert_eq!(tx.date, day(2015, 1, 16));
        assert_eq!(tx.source, "john");
        assert_eq!(tx.destination, "mary");
        assert_eq!(tx.value, money("125.00"));
        assert_eq!(tx.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let record = TransactionRecord {
            date: "  2015-01-16  ".to_string(),
            source: " john ".to_string(),
            destination: " mary ".to_string(),
            value: "  125.00  ".to_string(),
        };

        let tx = record.parse(1).unwrap();
        assert_eq!(tx.source, "john");
        assert_eq!(tx.value, money("125.00"));
    }

    #[test]
    fn test_parse_rejects_malformed_date() {
        let record = TransactionRecord {
            date: "2015-13-45".to_string(),
            source: "john".to_string(),
            destination: "mary".to_string(),
            value: "125.00".to_string(),
        };

        let err = record.parse(3).unwrap_err();
        assert!(err.to_string().contains("row 3"));
        assert!(err.to_string().contains("malformed date"));
    }

    #[test]
    fn test_parse_rejects_malformed_value() {
        let record = TransactionRecord {
            date: "2015-01-16".to_string(),
            source: "john".to_string(),
            destination: "mary".to_string(),
            value: "a lot".to_string(),
        };

        let err = record.parse(2).unwrap_err();
        assert!(err.to_string().contains("row 2"));
        assert!(err.to_string().contains("malformed value"));
    }

    #[test]
    fn test_canonical_ordering() {
        let mut transactions = vec![
            Transaction::new(day(2015, 1, 17), "mary", "insurance", money("100.00")),
            Transaction::new(day(2015, 1, 17), "john", "supermarket", money("20.00")),
            Transaction::new(day(2015, 1, 16), "john", "mary", money("125.00")),
            Transaction::new(day(2015, 1, 17), "john", "supermarket", money("5.00")),
        ];
        transactions.sort();

        // Date first, then source, then destination, then value.
        assert_eq!(transactions[0].date, day(2015, 1, 16));
        assert_eq!(transactions[1].value, money("5.00"));
        assert_eq!(transactions[2].value, money("20.00"));
        assert_eq!(transactions[3].source, "mary");
    }

    #[test]
    fn test_ordering_falls_back_to_currency_symbol() {
        let base = Transaction::new(day(2015, 1, 16), "john", "mary", money("125.00"));
        let euro = base.clone().with_currency_symbol("€");

        assert_ne!(base, euro);
        assert!(base < euro || euro < base);
    }

    #[test]
    fn test_display() {
        let tx = Transaction::new(day(2015, 1, 16), "john", "mary", money("125.00"));
        assert_eq!(tx.to_string(), "2015-01-16 john:-§125.00 mary:+§125.00");
    }
}
