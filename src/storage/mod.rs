pub mod csv_backend;

pub use csv_backend::{ExpenseIter, LedgerStore};
