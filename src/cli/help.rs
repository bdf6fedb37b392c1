use crate::cli::output::{self, section};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::{Alignment, Table, TableColumn};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    let mut table = Table::new(vec![
        TableColumn::new("Command", Alignment::Left),
        TableColumn::new("Description", Alignment::Left),
    ]);
    for entry in registry.list() {
        table.push_row(vec![entry.name.to_string(), entry.description.to_string()]);
    }
    output::block(&table.render());
    output::hint("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    output::block(&format!(
        "  {}\n  usage: {}",
        entry.description, entry.usage
    ));
}
