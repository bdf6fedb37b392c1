use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{render_distribution, DEFAULT_BAR_WIDTH};
use crate::cli::{io, output};
use crate::ledger::{CategoryReport, DateWindow};

use super::{parse_date, usage_error};

const REPORT_USAGE: &str = "report [from yyyy-mm-dd] [to yyyy-mm-dd]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Show spending per category",
        REPORT_USAGE,
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 2 {
        return Err(usage_error(REPORT_USAGE));
    }
    let from = args.first().map(|raw| parse_date(raw)).transpose()?;
    let to = args.get(1).map(|raw| parse_date(raw)).transpose()?;
    let window = DateWindow::new(from, to)?;

    let totals = context.store.aggregate_between(window)?;
    let report = CategoryReport::from_totals(&totals);
    if report.is_empty() {
        io::print_info("No expenses to report.");
        return Ok(());
    }

    output::section("Expense Distribution by Category");
    if !window.is_unbounded() {
        io::print_info(format!(
            "From {} to {}",
            from.map_or_else(|| "the beginning".to_string(), |date| date.to_string()),
            to.map_or_else(|| "the latest entry".to_string(), |date| date.to_string()),
        ));
    }
    output::block(&render_distribution(
        &report,
        context.currency(),
        DEFAULT_BAR_WIDTH,
    ));
    Ok(())
}
