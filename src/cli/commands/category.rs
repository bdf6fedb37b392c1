use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::{forms, io, output};

use super::usage_error;

const ADD_CATEGORY_USAGE: &str = "add-category <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "List known categories",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "add-category",
            "Add a custom category",
            ADD_CATEGORY_USAGE,
            cmd_add_category,
        ),
    ]
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let categories = context.store.load_categories()?;
    if categories.is_empty() {
        io::print_info("No categories defined. Use `add-category <name>` to create one.");
        return Ok(());
    }
    output::section("Categories");
    let lines: Vec<String> = categories
        .iter()
        .enumerate()
        .map(|(idx, name)| format!("  {:>2}. {}", idx + 1, name))
        .collect();
    output::block(&lines.join("\n"));
    Ok(())
}

fn cmd_add_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(usage_error(ADD_CATEGORY_USAGE));
        }
        forms::prompt_new_category(context)?;
        return Ok(());
    }
    let name = context.store.add_category(&args.join(" "))?;
    io::print_success(format!("Category `{}` added successfully!", name));
    Ok(())
}
