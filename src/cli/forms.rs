//! Interactive data entry for expenses and categories.

use chrono::Local;

use crate::cli::core::{CommandError, ShellContext};
use crate::cli::io;
use crate::ledger::{is_sentinel, Amount, ExpenseRecord, DATE_FORMAT};

/// Raw answers collected by the expense wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl ExpenseForm {
    pub fn into_record(self) -> Result<ExpenseRecord, CommandError> {
        Ok(ExpenseRecord::new(
            &self.date,
            &self.category,
            &self.amount,
            &self.description,
        )?)
    }
}

pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

fn required(value: &String) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("This field is required".into())
    } else {
        Ok(())
    }
}

/// Walks through every field; `initial` pre-fills the answers when editing.
pub fn prompt_expense(
    context: &mut ShellContext,
    initial: Option<&ExpenseRecord>,
) -> Result<ExpenseForm, CommandError> {
    let default_date = initial.map(|record| record.date.clone()).unwrap_or_else(today);
    let date = io::prompt_validated(
        &context.theme,
        "Date (yyyy-mm-dd)",
        Some(default_date.as_str()),
        required,
    )?;

    let category = pick_category(context, initial.map(|record| record.category.as_str()))?;

    let amount = io::prompt_validated(
        &context.theme,
        "Amount",
        initial.map(|record| record.amount.as_str()),
        |value: &String| Amount::parse(value).map(|_| ()).map_err(|err| err.to_string()),
    )?;

    let description = io::prompt_validated(
        &context.theme,
        "Description",
        initial.map(|record| record.description.as_str()),
        required,
    )?;

    Ok(ExpenseForm {
        date,
        category,
        amount,
        description,
    })
}

/// Category picker. Choosing the sentinel entry runs the add-category flow
/// and returns the newly created name.
pub fn pick_category(
    context: &mut ShellContext,
    current: Option<&str>,
) -> Result<String, CommandError> {
    loop {
        let categories = context.store.load_categories()?;
        let options = categories.with_sentinel();
        let default = current
            .and_then(|name| options.iter().position(|option| option == name))
            .unwrap_or(0);
        let choice = io::select(&context.theme, "Category", &options, default)?;
        let picked = &options[choice];
        if !is_sentinel(picked) {
            return Ok(picked.clone());
        }
        match prompt_new_category(context) {
            Ok(name) => return Ok(name),
            Err(CommandError::Ledger(err)) if err.is_validation() => {
                io::print_error(err);
            }
            Err(other) => return Err(other),
        }
    }
}

/// Asks for a category name and stores it.
pub fn prompt_new_category(context: &mut ShellContext) -> Result<String, CommandError> {
    let name = io::prompt_text(&context.theme, "Enter new category", None)?;
    let stored = context.store.add_category(&name)?;
    io::print_success("Category added successfully!");
    Ok(stored)
}
