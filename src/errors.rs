use thiserror::Error;

/// Error type that captures ledger, taxonomy, and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed records file: {0}")]
    MalformedState(String),
    #[error("{0}")]
    MalformedInput(String),
    #[error("The specified category `{0}` is not in the category list.")]
    UnknownCategory(String),
    #[error("Index {index} is out of range; the ledger has {len} record(s).")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("Invalid index: {0}")]
    InvalidIndex(String),
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
