pub mod category;
pub mod expense;
pub mod report;
pub mod system;

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;
use crate::ledger::{RecordId, DATE_FORMAT};

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let entries = expense::definitions()
        .into_iter()
        .chain(category::definitions())
        .chain(report::definitions())
        .chain(system::definitions());
    for entry in entries {
        registry.register(entry);
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

/// First argument as an expense id.
pub(crate) fn parse_id(args: &[&str], usage: &str) -> Result<RecordId, CommandError> {
    let raw = args.first().ok_or_else(|| usage_error(usage))?;
    Ok(raw.parse::<RecordId>()?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date in yyyy-mm-dd form", raw))
    })
}
