#![allow(dead_code)]

use expense_tracker::{ledger::ExpenseRecord, storage::LedgerStore};
use tempfile::TempDir;

/// Initialized store in a fresh temporary directory. Keep the `TempDir`
/// alive for as long as the store is used.
pub fn setup_test_store() -> (TempDir, LedgerStore) {
    let temp = TempDir::new().expect("create temp dir");
    let store = LedgerStore::in_dir(temp.path());
    store.initialize().expect("initialize store");
    (temp, store)
}

pub fn record(date: &str, category: &str, amount: &str, description: &str) -> ExpenseRecord {
    ExpenseRecord::new(date, category, amount, description).expect("valid record")
}

/// Store pre-filled with three expenses.
pub fn seeded_store() -> (TempDir, LedgerStore) {
    let (temp, mut store) = setup_test_store();
    store
        .add_expense("2024-01-01", "Food", "10", "a")
        .expect("seed a");
    store
        .add_expense("2024-01-02", "Food", "5", "b")
        .expect("seed b");
    store
        .add_expense("2024-01-03", "Rent", "100", "c")
        .expect("seed c");
    (temp, store)
}

pub fn descriptions(store: &LedgerStore) -> Vec<String> {
    store
        .expenses()
        .expect("list expenses")
        .into_iter()
        .map(|listed| listed.record.description)
        .collect()
}
