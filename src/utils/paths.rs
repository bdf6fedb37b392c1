use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";
const LEDGER_FILE: &str = "expenses.csv";
const CATEGORIES_FILE: &str = "categories.txt";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.expense_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default ledger CSV inside `base`.
pub fn ledger_file_in(base: &Path) -> PathBuf {
    base.join(LEDGER_FILE)
}

/// Default category list inside `base`.
pub fn categories_file_in(base: &Path) -> PathBuf {
    base.join(CATEGORIES_FILE)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_base() {
        let base = Path::new("/tmp/ledger-home");
        assert_eq!(ledger_file_in(base), base.join("expenses.csv"));
        assert_eq!(categories_file_in(base), base.join("categories.txt"));
        assert_eq!(config_file_in(base), base.join("config.json"));
    }
}
