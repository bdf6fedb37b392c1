//! Shell context construction, dispatch and error reporting.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    errors::LedgerError,
    storage::LedgerStore,
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Failure of a single command; the shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure that ends the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::from_manager(mode, ConfigManager::new()?)
    }

    /// Context rooted at `base` instead of the user's application directory.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        Self::from_manager(mode, ConfigManager::with_base_dir(base)?)
    }

    fn from_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
        });

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let store = LedgerStore::from_config(&config, config_manager.base_dir());
        store.initialize()?;
        tracing::debug!(ledger = %store.ledger_path().display(), "shell context ready");

        Ok(Self {
            mode,
            registry,
            store,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    /// Adopts `candidate` as the active configuration. The store it
    /// describes is initialized before anything is saved, so a location
    /// that cannot be used leaves both the session and `config.json` as
    /// they were.
    pub(crate) fn apply_config(&mut self, candidate: Config) -> CommandResult {
        let store = LedgerStore::from_config(&candidate, self.config_manager.base_dir());
        if store.ledger_path() != self.store.ledger_path()
            || store.categories_path() != self.store.categories_path()
        {
            store.initialize()?;
        }
        self.config_manager.save(&candidate)?;
        self.store = store;
        self.config = candidate;
        Ok(())
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(&input.to_lowercase()) {
            cli_io::print_hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(err) if err.is_validation() => cli_io::print_error(err),
            other => cli_io::print_error(format!("Command failed: {}", other)),
        }
    }
}
