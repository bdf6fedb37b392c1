use crate::cli::output::current_preferences;
use crate::ledger::CategoryReport;

use super::table::{Alignment, Table, TableColumn};

pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Renders a report as a table with one proportional bar per category.
pub fn render_distribution(report: &CategoryReport, currency: &str, bar_width: usize) -> String {
    let glyph = if current_preferences().plain_mode {
        "#"
    } else {
        "█"
    };
    let mut table = Table::new(vec![
        TableColumn::new("Category", Alignment::Left).max_width(24),
        TableColumn::new(format!("Total ({currency})"), Alignment::Right),
        TableColumn::new("Share", Alignment::Right),
        TableColumn::new("", Alignment::Left),
    ]);
    for share in &report.shares {
        table.push_row(vec![
            share.category.clone(),
            format!("{:.2}", share.total),
            format!("{:.1}%", share.percent),
            glyph.repeat(bar_length(share.percent, bar_width)),
        ]);
    }
    format!(
        "{}\n\nTotal: {:.2} {}",
        table.render(),
        report.grand_total,
        currency
    )
}

fn bar_length(percent: f64, bar_width: usize) -> usize {
    if percent <= 0.0 {
        return 0;
    }
    let scaled = (percent / 100.0 * bar_width as f64).round() as usize;
    scaled.clamp(1, bar_width)
}
