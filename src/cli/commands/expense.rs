use chrono::NaiveDate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{render_expense, Alignment, Table, TableColumn};
use crate::cli::{forms, io, output};
use crate::ledger::{ExpenseRecord, ListedExpense, DATE_FORMAT};

use super::{parse_id, usage_error};

const ADD_USAGE: &str = "add [yyyy-mm-dd] <category> <amount> <description>";
const UPDATE_USAGE: &str = "update <id> [[yyyy-mm-dd] <category> <amount> <description>]";
const SHOW_USAGE: &str = "show <id>";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new("list", "Show every recorded expense", "list", cmd_list),
        CommandEntry::new("show", "Show one expense in detail", SHOW_USAGE, cmd_show),
        CommandEntry::new("update", "Change an existing expense", UPDATE_USAGE, cmd_update),
        CommandEntry::new("delete", "Remove an expense", DELETE_USAGE, cmd_delete),
    ]
}

/// Positional expense values; the leading date is optional.
#[derive(Debug, PartialEq, Eq)]
struct ExpenseArgs<'a> {
    date: Option<&'a str>,
    category: &'a str,
    amount: &'a str,
    description: String,
}

fn parse_expense_args<'a>(args: &[&'a str], usage: &str) -> Result<ExpenseArgs<'a>, CommandError> {
    let (date, rest) = match args.split_first() {
        Some((first, rest)) if NaiveDate::parse_from_str(first, DATE_FORMAT).is_ok() => {
            (Some(*first), rest)
        }
        _ => (None, args),
    };
    if rest.len() < 3 {
        return Err(usage_error(usage));
    }
    Ok(ExpenseArgs {
        date,
        category: rest[0],
        amount: rest[1],
        description: rest[2..].join(" "),
    })
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let record = if args.is_empty() && context.is_interactive() {
        forms::prompt_expense(context, None)?.into_record()?
    } else {
        let parsed = parse_expense_args(args, ADD_USAGE)?;
        let today = forms::today();
        ExpenseRecord::new(
            parsed.date.unwrap_or(&today),
            parsed.category,
            parsed.amount,
            &parsed.description,
        )?
    };
    let id = context.store.append_expense(&record)?;
    io::print_success(format!("Expense added successfully! (#{})", id));
    warn_if_unlisted(context, &record.category);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let expenses = context.store.expenses()?;
    if expenses.is_empty() {
        io::print_info("No expenses recorded yet. Use `add` to record one.");
        return Ok(());
    }
    output::block(&expense_table(&expenses).render());
    io::print_info(format!("{} expense(s)", expenses.len()));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, SHOW_USAGE)?;
    let record = context.store.expense(id)?;
    output::section(format!("Expense #{}", id));
    output::block(&render_expense(id, &record, context.currency()));
    Ok(())
}

fn cmd_update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, UPDATE_USAGE)?;
    let current = context.store.expense(id)?;
    let values = &args[1..];
    let record = if values.is_empty() {
        if !context.is_interactive() {
            return Err(usage_error(UPDATE_USAGE));
        }
        forms::prompt_expense(context, Some(&current))?.into_record()?
    } else {
        let parsed = parse_expense_args(values, UPDATE_USAGE)?;
        ExpenseRecord::new(
            parsed.date.unwrap_or(&current.date),
            parsed.category,
            parsed.amount,
            &parsed.description,
        )?
    };
    context.store.update_expense(id, &record)?;
    io::print_success(format!("Expense #{} updated successfully!", id));
    warn_if_unlisted(context, &record.category);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, DELETE_USAGE)?;
    let record = context.store.expense(id)?;
    if context.is_interactive() {
        let prompt = format!(
            "Delete expense #{} ({} {} {} {})?",
            id, record.date, record.category, record.amount, record.description
        );
        if !io::confirm_action(&context.theme, &prompt, false)? {
            io::print_info("Deletion cancelled.");
            return Ok(());
        }
    }
    context.store.delete_expense(id)?;
    io::print_success(format!("Expense #{} deleted successfully!", id));
    Ok(())
}

fn expense_table(expenses: &[ListedExpense]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("#", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Category", Alignment::Left).max_width(20),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Description", Alignment::Left).max_width(40),
    ]);
    for listed in expenses {
        let record = &listed.record;
        table.push_row(vec![
            listed.id.to_string(),
            record.date.clone(),
            record.category.clone(),
            record.amount.to_string(),
            record.description.clone(),
        ]);
    }
    table
}

/// Categories are not enforced on records; point out ones missing from the list.
fn warn_if_unlisted(context: &ShellContext, category: &str) {
    match context.store.load_categories() {
        Ok(categories) if !categories.contains(category) => io::print_warning(format!(
            "Category `{}` is not in the category list. Use `add-category {}` to add it.",
            category, category
        )),
        Ok(_) => {}
        Err(err) => tracing::warn!(%err, "could not read categories"),
    }
}
