use crate::errors::{LedgerError, Result};

/// Picker entry that starts the add-category flow. Never a real category.
pub const CUSTOM_CATEGORY_SENTINEL: &str = "Add Custom Category";

/// Categories written to a fresh category file.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Food", "Rent", "Entertainment", "Utilities"];

pub fn is_sentinel(name: &str) -> bool {
    name == CUSTOM_CATEGORY_SENTINEL
}

/// Ordered set of unique category labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryList {
    names: Vec<String>,
}

impl CategoryList {
    /// Parses the persisted form: one label per line, blank lines ignored.
    pub fn from_lines(text: &str) -> Self {
        let mut list = Self::default();
        for line in text.lines() {
            let name = line.trim();
            if !name.is_empty() && !list.contains(name) {
                list.names.push(name.to_string());
            }
        }
        list
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Checks a candidate label and returns it trimmed.
    pub fn validate_new(&self, candidate: &str) -> Result<String> {
        let name = candidate.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("Category name cannot be empty!"));
        }
        if name.contains(&['\n', '\r'][..]) {
            return Err(LedgerError::validation(
                "Category name must fit on a single line!",
            ));
        }
        if is_sentinel(name) {
            return Err(LedgerError::validation(format!(
                "`{}` is reserved and cannot be used as a category!",
                name
            )));
        }
        if self.contains(name) {
            return Err(LedgerError::validation("Category already exists!"));
        }
        Ok(name.to_string())
    }

    /// Picker options: every category followed by the sentinel entry.
    pub fn with_sentinel(&self) -> Vec<String> {
        let mut options = self.names.clone();
        options.push(CUSTOM_CATEGORY_SENTINEL.to_string());
        options
    }
}

impl<'a> IntoIterator for &'a CategoryList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
