use std::path::{Path, PathBuf};

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    storage::LedgerStore,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the store, configuration and
/// the command table.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn base_dir(&self) -> &Path {
        self.config_manager.base_dir()
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.store.ledger_path().to_path_buf()
    }

    /// Category names for completion; empty when the file cannot be read.
    pub fn category_names(&self) -> Vec<String> {
        self.store
            .load_categories()
            .map(|list| list.as_slice().to_vec())
            .unwrap_or_default()
    }
}
