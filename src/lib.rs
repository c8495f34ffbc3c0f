//! # Ledger Engine
//!
//! Computes running account balances from a ledger of dated double-entry
//! transactions.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: all monetary values use `rust_decimal`
//! - **Immutable ledger**: transactions never change after load
//! - **Pure queries**: every balance query recomputes from the full
//!   transaction sequence; no balance state is cached between calls
//! - **Deterministic ordering**: transactions sort by
//!   (date, source, destination, value) at load time
//!
//! ## Example
//!
//! ```no_run
//! use ledger_engine::{Cutoff, Ledger};
//!
//! let ledger = Ledger::from_path("transactions.csv").unwrap();
//! let balances = ledger.balances(Cutoff::Unbounded).unwrap();
//! for (account, balance) in balances.iter() {
//!     println!("{}: {}", account, balance);
//! }
//! ```

pub mod balance;
pub mod error;
pub mod ledger;
pub mod money;
pub mod transaction;

pub use balance::{Balances, DailyBalance, DailyBalances};
pub use error::{LedgerError, Result};
pub use ledger::{Cutoff, Ledger};
pub use money::Money;
pub use transaction::{Transaction, TransactionRecord, DEFAULT_CURRENCY_SYMBOL};
