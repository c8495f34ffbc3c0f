//! Ledger loading and balance queries.
//!
//! A [`Ledger`] owns an immutable, canonically sorted transaction sequence
//! and answers pure balance queries over it, optionally bounded by an
//! inclusive ending date and optionally broken down per calendar day.

use crate::balance::{Balances, DailyBalance, DailyBalances};
use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::transaction::{Transaction, TransactionRecord, DATE_FORMAT};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Inclusive upper bound on transaction dates in a balance query.
///
/// [`Cutoff::Unbounded`] includes every transaction. A cutoff converts
/// infallibly from a [`NaiveDate`], or from `YYYY-MM-DD` text with
/// validation: text that is not a calendar date is rejected with
/// [`LedgerError::InvalidEndingDate`] rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cutoff {
    /// No upper bound; every transaction is included.
    #[default]
    Unbounded,

    /// Include transactions dated on or before this day.
    On(NaiveDate),
}

impl Cutoff {
    /// Returns `true` if a transaction dated `date` falls within this cutoff.
    pub fn includes(self, date: NaiveDate) -> bool {
        match self {
            Cutoff::Unbounded => true,
            Cutoff::On(limit) => date <= limit,
        }
    }
}

impl From<NaiveDate> for Cutoff {
    fn from(date: NaiveDate) -> Self {
        Cutoff::On(date)
    }
}

impl TryFrom<&str> for Cutoff {
    type Error = LedgerError;

    fn try_from(text: &str) -> Result<Self> {
        NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .map(Cutoff::On)
            .map_err(|_| LedgerError::InvalidEndingDate {
                text: text.to_string(),
            })
    }
}

impl FromStr for Cutoff {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Cutoff::try_from(s)
    }
}

/// An ordered, immutable collection of transactions.
///
/// Transactions are sorted by (date, source, destination, value) at load
/// time and never mutated or removed afterwards. Every query recomputes
/// its result from the full sequence and returns a mapping owned by the
/// caller; no balance state is cached between calls, so concurrent
/// read-only queries through `&Ledger` are safe.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
        }
    }

    /// Builds a ledger from already-parsed transactions, sorting them into
    /// canonical order.
    pub fn from_transactions(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort();
        Ledger { transactions }
    }

    /// Loads a ledger from a CSV file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a ledger from headerless CSV rows: date, source, destination,
    /// value.
    ///
    /// The whole load fails on the first malformed row; there is no
    /// partial result.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(reader);

        let mut transactions = Vec::new();
        for (row_idx, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
            let row = row_idx + 1;
            let record: TransactionRecord = result?;
            let transaction = record.parse(row)?;

            if transaction.value.is_negative() {
                warn!("Row {}: negative value in {}", row, transaction);
            }
            transactions.push(transaction);
        }

        transactions.sort();
        debug!("Loaded {} transactions", transactions.len());

        Ok(Ledger { transactions })
    }

    /// The transactions in canonical order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of loaded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns `true` if the ledger holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Computes the net balance of every account over transactions dated
    /// on or before `ending`.
    ///
    /// Accounts touched by an included transaction stay in the result even
    /// at net zero; accounts never touched are absent and read as zero
    /// through [`Balances::get`].
    pub fn balances<C>(&self, ending: C) -> Result<Balances>
    where
        C: TryInto<Cutoff>,
        LedgerError: From<C::Error>,
    {
        let cutoff = ending.try_into()?;
        Ok(self.balances_at(cutoff))
    }

    /// Net balance for a single account, or exact zero if it never appears.
    pub fn balance_for<C>(&self, account: &str, ending: C) -> Result<Money>
    where
        C: TryInto<Cutoff>,
        LedgerError: From<C::Error>,
    {
        let cutoff = ending.try_into()?;
        Ok(self.balances_at(cutoff).get(account))
    }

    /// Cumulative balance of `account` at the end of each distinct
    /// transaction day on or before `ending`, ascending by date.
    ///
    /// Each day's value includes every transaction up to and including
    /// that day: a running balance, not a daily delta. Empty when no
    /// transaction dates fall within the cutoff.
    pub fn balance_for_by_day<C>(&self, account: &str, ending: C) -> Result<DailyBalance>
    where
        C: TryInto<Cutoff>,
        LedgerError: From<C::Error>,
    {
        let cutoff = ending.try_into()?;
        Ok(self
            .days_through(cutoff)
            .into_iter()
            .map(|day| (day, self.balances_at(Cutoff::On(day)).get(account)))
            .collect())
    }

    /// Full cumulative balance snapshot at the end of each distinct
    /// transaction day on or before `ending`, ascending by date.
    pub fn balances_by_day<C>(&self, ending: C) -> Result<DailyBalances>
    where
        C: TryInto<Cutoff>,
        LedgerError: From<C::Error>,
    {
        let cutoff = ending.try_into()?;
        Ok(self
            .days_through(cutoff)
            .into_iter()
            .map(|day| (day, self.balances_at(Cutoff::On(day))))
            .collect())
    }

    fn balances_at(&self, cutoff: Cutoff) -> Balances {
        let mut balances = Balances::new();
        for transaction in &self.transactions {
            if cutoff.includes(transaction.date) {
                balances.transfer(
                    &transaction.source,
                    &transaction.destination,
                    transaction.value,
                );
            }
        }
        balances
    }

    /// Distinct transaction days within `cutoff`, ascending.
    fn days_through(&self, cutoff: Cutoff) -> Vec<NaiveDate> {
        // Transactions are date-sorted, so dedup on the date sequence is
        // a full deduplication.
        let mut days: Vec<NaiveDate> = self
            .transactions
            .iter()
            .map(|transaction| transaction.date)
            .filter(|date| cutoff.includes(*date))
            .collect();
        days.dedup();
        days
    }
}
