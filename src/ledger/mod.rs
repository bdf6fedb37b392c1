//! Ledger domain models: expense records, categories, and category reports.

pub mod category;
pub mod record;
pub mod report;

pub use category::{is_sentinel, CategoryList, CUSTOM_CATEGORY_SENTINEL, DEFAULT_CATEGORIES};
pub use record::{Amount, ExpenseRecord, ListedExpense, RecordId, DATE_FORMAT, LEDGER_HEADER};
pub use report::{CategoryReport, CategoryShare, CategoryTotals, DateWindow};
