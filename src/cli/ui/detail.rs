use crate::ledger::{ExpenseRecord, RecordId};

/// Label/value lines for a single record, labels padded to a common width.
pub fn render_expense(id: RecordId, record: &ExpenseRecord, currency: &str) -> String {
    let fields = [
        ("Id", id.to_string()),
        ("Date", record.date.clone()),
        ("Category", record.category.clone()),
        ("Amount", format!("{} {}", record.amount, currency)),
        ("Description", record.description.clone()),
    ];
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("  {label:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
