#![doc(test(attr(deny(warnings))))]

//! Moneybook keeps a personal ledger of income and expense records, each tagged
//! with a category from a fixed hierarchical taxonomy, and persists it to a flat
//! text file between sessions.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Moneybook tracing initialized.");
    });
}
