pub mod text_backend;

use crate::{
    errors::Result,
    ledger::{CategoryTree, Ledger},
};

pub use text_backend::TextStorage;

/// Result of reading persisted state at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Ledger),
    /// No state has been saved yet.
    Missing,
    /// State exists but could not be parsed; all records are discarded.
    Malformed(String),
}

/// Abstraction over persistence backends capable of storing a ledger.
pub trait StorageBackend {
    fn load(&self, tree: &CategoryTree) -> Result<LoadOutcome>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
