use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::LedgerError,
    ledger::DEFAULT_CATEGORIES,
    utils::{
        paths::{app_data_dir, categories_file_in, config_file_in, ledger_file_in},
        persistence::write_string_atomically,
    },
};

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 3] = ["currency", "ledger_file", "categories_file"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_file: Option<PathBuf>,
    pub default_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            ledger_file: None,
            categories_file: None,
            default_categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Ledger CSV location, relative overrides resolved against `base`.
    pub fn ledger_path(&self, base: &Path) -> PathBuf {
        match &self.ledger_file {
            Some(path) => base.join(path),
            None => ledger_file_in(base),
        }
    }

    pub fn categories_path(&self, base: &Path) -> PathBuf {
        match &self.categories_file {
            Some(path) => base.join(path),
            None => categories_file_in(base),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LedgerError::validation(format!(
                "A value is required for `{}`",
                key
            )));
        }
        match key {
            "currency" => self.currency = value.to_ascii_uppercase(),
            "ledger_file" => self.ledger_file = Some(PathBuf::from(value)),
            "categories_file" => self.categories_file = Some(PathBuf::from(value)),
            other => {
                return Err(LedgerError::validation(format!(
                    "Unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_string_atomically(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
