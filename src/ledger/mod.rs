//! Ledger records, the category taxonomy, and batch parsing.

pub mod batch;
pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;

pub use category::{default_taxonomy, CategoryNode, CategoryTree, TreeEntry};
pub use ledger::{FilterResult, Ledger};
pub use record::Record;
