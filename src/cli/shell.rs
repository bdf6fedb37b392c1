use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Context as ReadlineContext, Editor, Helper,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;

const SCRIPT_ENV: &str = "EXPENSE_TRACKER_CLI_SCRIPT";
const PROMPT: &str = "expenses> ";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(
        context.command_names(),
        context.category_names(),
    )));
    cli_io::print_info("Expense Tracker. Type `help` to see available commands.");

    while context.running {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
                if let Some(helper) = editor.helper_mut() {
                    helper.categories = context.category_names();
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                cli_io::print_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Executes one command per input line. Blank lines and `#` comments are skipped.
pub fn run_script<R: BufRead>(context: &mut ShellContext, input: R) -> Result<(), CliError> {
    for line in input.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(format!("Could not parse input: {}", err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Completes command names in the first position and category names after it.
struct CommandHelper {
    commands: Vec<String>,
    categories: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>, categories: Vec<String>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            categories,
        }
    }

    fn candidates(&self, first_word: bool, needle: &str) -> Vec<Pair> {
        let pool = if first_word {
            &self.commands
        } else {
            &self.categories
        };
        let needle = needle.to_lowercase();
        pool.iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: if name.contains(' ') {
                    format!("\"{}\"", name)
                } else {
                    name.clone()
                },
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = word_start(prefix);
        let first_word = prefix[..start].trim().is_empty();
        Ok((start, self.candidates(first_word, &prefix[start..])))
    }
}

/// Byte offset where the word under the cursor begins.
fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0)
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn script_context() -> (tempfile::TempDir, ShellContext) {
        let dir = tempdir().unwrap();
        let context = ShellContext::with_base_dir(CliMode::Script, dir.path().to_path_buf())
            .expect("context");
        (dir, context)
    }

    #[test]
    fn script_adds_and_deletes() {
        let (_dir, mut context) = script_context();
        let script = "\
# monthly bills
add 2024-01-01 Rent 900 \"January rent\"
add 2024-01-02 Food 12.5 groceries
delete 1
";
        run_script(&mut context, script.as_bytes()).unwrap();

        let listed = context.store.expenses().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].record.description, "groceries");
    }

    #[test]
    fn exit_stops_processing() {
        let (_dir, mut context) = script_context();
        run_script(&mut context, "exit\nadd 2024-01-01 Food 1 late\n".as_bytes()).unwrap();
        assert!(!context.running);
        assert!(context.store.expenses().unwrap().is_empty());
    }

    #[test]
    fn failing_commands_do_not_abort_the_script() {
        let (dir, mut context) = script_context();
        let script = "add 2024-01-01 Food abc bad\nadd-category Food\nadd-category Travel\n";
        run_script(&mut context, script.as_bytes()).unwrap();

        assert!(context.store.expenses().unwrap().is_empty());
        let categories = fs::read_to_string(dir.path().join("categories.txt")).unwrap();
        assert_eq!(categories, "Food\nRent\nEntertainment\nUtilities\nTravel\n");
    }

    #[test]
    fn config_set_moves_the_ledger() {
        let (dir, mut context) = script_context();
        run_script(
            &mut context,
            "config set ledger_file books/2024.csv\nadd 2024-02-01 Food 3 tea\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(context.ledger_path(), dir.path().join("books/2024.csv"));
        assert_eq!(context.store.expenses().unwrap().len(), 1);
        assert!(dir.path().join("config.json").exists());
    }

    #[test]
    fn completion_switches_to_categories_after_command() {
        let helper = CommandHelper::new(
            vec!["add", "add-category", "list"],
            vec!["Food".into(), "Eating Out".into()],
        );
        let commands: Vec<String> = helper
            .candidates(true, "ad")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(commands, ["add", "add-category"]);

        let categories: Vec<String> = helper
            .candidates(false, "ea")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(categories, ["\"Eating Out\""]);
    }

    #[test]
    fn unusable_ledger_location_is_not_saved() {
        let (dir, mut context) = script_context();
        fs::write(dir.path().join("blocker"), "not a directory").unwrap();
        let original = context.ledger_path();

        run_script(
            &mut context,
            "config set ledger_file blocker/ledger.csv\nadd 2024-02-01 Food 3 tea\n".as_bytes(),
        )
        .unwrap();

        assert_eq!(context.ledger_path(), original);
        assert_eq!(context.store.expenses().unwrap().len(), 1);
        let saved = fs::read_to_string(dir.path().join("config.json")).unwrap_or_default();
        assert!(!saved.contains("blocker"));

        let restarted = ShellContext::with_base_dir(CliMode::Script, dir.path().to_path_buf())
            .expect("restart after rejected setting");
        assert_eq!(restarted.ledger_path(), original);
    }

    #[test]
    fn word_start_handles_wide_whitespace() {
        assert_eq!(word_start("add"), 0);
        assert_eq!(word_start("add Fo"), 4);
        let wide = "add\u{3000}Fo";
        let start = word_start(wide);
        assert_eq!(start, "add\u{3000}".len());
        assert_eq!(&wide[start..], "Fo");
    }
}
