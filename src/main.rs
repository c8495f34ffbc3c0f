//! Ledger balance CLI.
//!
//! Reads a CSV of transactions (date, source, destination, value) and
//! prints account balances as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv
//! cargo run -- transactions.csv --until 2015-01-16
//! cargo run -- transactions.csv --account john --by-day
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use ledger_engine::{
    Balances, Cutoff, DailyBalance, DailyBalances, Ledger, LedgerError, Money, Result,
};
use std::env;
use std::io::{self, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

struct Args {
    input: String,
    account: Option<String>,
    until: Option<String>,
    by_day: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut input = None;
    let mut account = None;
    let mut until = None;
    let mut by_day = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--account" => account = Some(flag_value(&mut iter, "--account")?),
            "--until" => until = Some(flag_value(&mut iter, "--until")?),
            "--by-day" => by_day = true,
            flag if flag.starts_with("--") => {
                return Err(LedgerError::InvalidArgument(flag.to_string()));
            }
            path => {
                if input.is_some() {
                    return Err(LedgerError::InvalidArgument(path.to_string()));
                }
                input = Some(path.to_string());
            }
        }
    }

    Ok(Args {
        input: input.ok_or(LedgerError::MissingArgument)?,
        account,
        until,
        by_day,
    })
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| LedgerError::InvalidArgument(format!("{} requires a value", flag)))
}

fn run() -> Result<()> {
    let raw_args: Vec<String> = env::args().collect();
    let args = parse_args(&raw_args)?;

    let ledger = Ledger::from_path(&args.input)?;
    let cutoff = match &args.until {
        Some(text) => Cutoff::try_from(text.as_str())?,
        None => Cutoff::Unbounded,
    };

    let stdout = io::stdout();
    let handle = stdout.lock();

    match (&args.account, args.by_day) {
        (None, false) => write_balances(handle, &ledger.balances(cutoff)?),
        (Some(account), false) => {
            write_balance(handle, account, ledger.balance_for(account, cutoff)?)
        }
        (None, true) => write_balances_by_day(handle, &ledger.balances_by_day(cutoff)?),
        (Some(account), true) => {
            write_balance_by_day(handle, &ledger.balance_for_by_day(account, cutoff)?)
        }
    }
}

/// Writes `account,balance` rows in ascending account order.
fn write_balances<W: Write>(writer: W, balances: &Balances) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["account", "balance"])?;
    for (account, balance) in balances.iter() {
        csv_writer.write_record([account.to_string(), balance.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes a single `account,balance` row; zero when the account never appears.
fn write_balance<W: Write>(writer: W, account: &str, balance: Money) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["account", "balance"])?;
    csv_writer.write_record([account.to_string(), balance.to_string()])?;

    csv_writer.flush()?;
    Ok(())
}

/// Writes `date,account,balance` rows: one full cumulative snapshot per day.
fn write_balances_by_day<W: Write>(writer: W, daily: &DailyBalances) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["date", "account", "balance"])?;
    for (day, balances) in daily {
        for (account, balance) in balances.iter() {
            csv_writer.write_record([day.to_string(), account.to_string(), balance.to_string()])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes `date,balance` rows: one cumulative balance per day.
fn write_balance_by_day<W: Write>(writer: W, daily: &DailyBalance) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["date", "balance"])?;
    for (day, balance) in daily {
        csv_writer.write_record([day.to_string(), balance.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(())
}
