//! Account balance mappings.
//!
//! A [`Balances`] maps account names to exact net amounts. Accounts that
//! never appear report a balance of exact zero; accounts touched by any
//! included transaction stay in the mapping even when their net is zero.

use crate::money::Money;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Cumulative per-day balances for a single account, ascending by date.
pub type DailyBalance = BTreeMap<NaiveDate, Money>;

/// Cumulative per-day balance snapshots for all accounts, ascending by date.
pub type DailyBalances = BTreeMap<NaiveDate, Balances>;

/// Net balance per account.
///
/// # Missing Accounts
///
/// [`Balances::get`] returns [`Money::ZERO`] for accounts that never
/// appear; a missing account is not an error. An account is only
/// materialized in the mapping once a transaction touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    accounts: BTreeMap<String, Money>,
}

impl Balances {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Balances::default()
    }

    /// Returns the balance for `account`, or exact zero if it never appears.
    pub fn get(&self, account: &str) -> Money {
        self.accounts.get(account).copied().unwrap_or(Money::ZERO)
    }

    /// Applies one double-entry transfer: debits `source` and credits
    /// `destination` by `value`.
    pub fn transfer(&mut self, source: &str, destination: &str, value: Money) {
        *self.entry(source) -= value;
        *self.entry(destination) += value;
    }

    fn entry(&mut self, account: &str) -> &mut Money {
        self.accounts
            .entry(account.to_string())
            .or_insert(Money::ZERO)
    }

    /// Iterates accounts and balances in ascending account-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.accounts
            .iter()
            .map(|(account, balance)| (account.as_str(), *balance))
    }

    /// Number of accounts touched.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if no account was touched.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every balance. Exact zero for any well-formed double-entry
    /// ledger, since each transfer debits and credits the same amount.
    pub fn total(&self) -> Money {
        self.accounts.values().copied().sum()
    }
}

impl<'a> FromIterator<(&'a str, Money)> for Balances {
    fn from_iter<I: IntoIterator<Item = (&'a str, Money)>>(iter: I) -> Self {
        Balances {
            accounts: iter
                .into_iter()
                .map(|(account, balance)| (account.to_string(), balance))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_missing_account_reads_zero() {
        let balances = Balances::new();
        assert_eq!(balances.get("bob"), Money::ZERO);
        assert!(balances.is_empty());
    }

    #[test]
    fn test_transfer_debits_source_credits_destination() {
        let mut balances = Balances::new();
        balances.transfer("john", "mary", money("125.00"));

        assert_eq!(balances.get("john"), money("-125.00"));
        assert_eq!(balances.get("mary"), money("125.00"));
        assert_eq!(balances.len(), 2);
    }

    #[test]
    fn test_transfers_accumulate() {
        let mut balances = Balances::new();
        balances.transfer("john", "mary", money("125.00"));
        balances.transfer("john", "supermarket", money("20.00"));

        assert_eq!(balances.get("john"), money("-145.00"));
    }

    #[test]
    fn test_touched_account_stays_at_net_zero() {
        let mut balances = Balances::new();
        balances.transfer("john", "mary", money("50.00"));
        balances.transfer("mary", "john", money("50.00"));

        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get("john"), Money::ZERO);
        assert_eq!(balances.get("mary"), Money::ZERO);
        assert!(balances.iter().any(|(account, _)| account == "john"));
    }

    #[test]
    fn test_total_is_zero() {
        let mut balances = Balances::new();
        balances.transfer("john", "mary", money("125.00"));
        balances.transfer("mary", "insurance", money("100.00"));

        assert!(balances.total().is_zero());
    }

    #[test]
    fn test_iter_ascending_by_account() {
        let mut balances = Balances::new();
        balances.transfer("walter", "alice", money("1.00"));
        balances.transfer("mike", "alice", money("2.00"));

        let accounts: Vec<&str> = balances.iter().map(|(account, _)| account).collect();
        assert_eq!(accounts, vec!["alice", "mike", "walter"]);
    }
}
