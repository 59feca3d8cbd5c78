//! Parsing of comma-separated `category description amount` entries.

use crate::errors::{LedgerError, Result};
use crate::ledger::Record;

pub const ENTRY_SEPARATOR: char = ',';

const FORMAT_HINT: &str =
    "The format of a record should be: category description amount (e.g. meal breakfast -50).";

/// Parses every entry of a batch. The first malformed entry fails the whole
/// batch; nothing is returned partially.
pub fn parse_batch(input: &str) -> Result<Vec<Record>> {
    input
        .split(ENTRY_SEPARATOR)
        .enumerate()
        .map(|(position, entry)| parse_entry(entry).map_err(|err| annotate(err, position + 1)))
        .collect()
}

/// Parses a single `category description amount` entry.
pub fn parse_entry(entry: &str) -> Result<Record> {
    let fields: Vec<&str> = entry.split_whitespace().collect();
    let [category, description, amount] = fields.as_slice() else {
        return Err(LedgerError::MalformedInput(FORMAT_HINT.into()));
    };
    let amount = parse_amount(amount)?;
    Ok(Record::new(*category, *description, amount))
}

pub(crate) fn parse_amount(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| LedgerError::MalformedInput(format!("Invalid amount `{raw}`.")))
}

fn annotate(err: LedgerError, position: usize) -> LedgerError {
    match err {
        LedgerError::MalformedInput(message) => {
            LedgerError::MalformedInput(format!("Entry {position}: {message}"))
        }
        other => other,
    }
}
