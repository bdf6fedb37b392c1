use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::{help, io, output};
use crate::config::CONFIG_KEYS;

use super::usage_error;

const CONFIG_USAGE: &str = "config [show | set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("config", "Show or change settings", CONFIG_USAGE, cmd_config),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        help::print_overview(&context.registry);
        return Ok(());
    };
    match context.registry.get(&name.to_lowercase()) {
        Some(entry) => help::print_command(entry),
        None => context.suggest_command(name),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let key = key.to_lowercase();
            let mut candidate = context.config.clone();
            candidate.set(&key, &value.join(" "))?;
            context.apply_config(candidate)?;
            io::print_success(format!("Setting `{}` saved.", key));
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Configuration");
    let lines = [
        format!("  data directory   {}", context.base_dir().display()),
        format!("  config file      {}", context.config_manager.path().display()),
        format!("  currency         {}", context.config.currency),
        format!("  ledger_file      {}", context.ledger_path().display()),
        format!(
            "  categories_file  {}",
            context.store.categories_path().display()
        ),
    ];
    output::block(&lines.join("\n"));
    output::hint(format!("Settable keys: {}", CONFIG_KEYS.join(", ")));
}
