#![doc(test(attr(deny(warnings))))]

//! Expense Tracker keeps a personal expense ledger in a plain CSV file,
//! with a companion category list, and summarizes spending per category.

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
        tracing::debug!("Expense Tracker tracing initialized.");
    });
}
