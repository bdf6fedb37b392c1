pub mod chart;
pub mod detail;
pub mod table;

pub use chart::{render_distribution, DEFAULT_BAR_WIDTH};
pub use detail::render_expense;
pub use table::{Alignment, Table, TableColumn};
