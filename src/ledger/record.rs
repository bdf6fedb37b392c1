use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::category::is_sentinel;
use crate::errors::{LedgerError, Result};

/// Column names of the ledger file, in their persisted order.
pub const LEDGER_HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// Date layout the shell writes and the date filters understand.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 1-based position of a data row in the ledger file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(usize);

impl RecordId {
    pub fn new(position: usize) -> Option<Self> {
        (position > 0).then_some(Self(position))
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits
            .parse::<usize>()
            .ok()
            .and_then(RecordId::new)
            .ok_or_else(|| LedgerError::validation(format!("`{}` is not a valid expense id", raw)))
    }
}

/// A finite amount together with the text it was written as.
///
/// Equality is numeric, so `10` and `10.0` name the same amount, while the
/// original text is what gets persisted. Rows that are not edited are
/// therefore rewritten exactly as they were read.
#[derive(Debug, Clone)]
pub struct Amount {
    value: f64,
    text: String,
}

impl Amount {
    pub fn parse(raw: &str) -> Result<Self> {
        let text = raw.trim();
        let value: f64 = text
            .parse()
            .map_err(|_| LedgerError::validation("Amount must be a number!"))?;
        if !value.is_finite() {
            return Err(LedgerError::validation("Amount must be a finite number!"));
        }
        Ok(Self {
            value,
            text: text.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self> {
        Amount::parse(raw)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Amount::parse(&raw).map_err(de::Error::custom)
    }
}

/// One row of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: Amount,
    #[serde(rename = "Description")]
    pub description: String,
}

impl ExpenseRecord {
    /// Validates raw user input and builds a record from the trimmed fields.
    pub fn new(date: &str, category: &str, amount: &str, description: &str) -> Result<Self> {
        let fields = [date, category, amount, description].map(str::trim);
        if fields.iter().any(|field| field.is_empty()) {
            return Err(LedgerError::validation("All fields are required!"));
        }
        let [date, category, amount, description] = fields;
        let record = Self {
            date: date.to_string(),
            category: category.to_string(),
            amount: Amount::parse(amount)?,
            description: description.to_string(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks the rules every persisted record must satisfy.
    pub fn validate(&self) -> Result<()> {
        let text_fields = [&self.date, &self.category, &self.description];
        if text_fields.iter().any(|field| field.trim().is_empty()) {
            return Err(LedgerError::validation("All fields are required!"));
        }
        if is_sentinel(self.category.trim()) {
            return Err(LedgerError::validation("Please select a valid category!"));
        }
        Ok(())
    }

    /// The record's date when it follows `yyyy-mm-dd`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// A record paired with the id it was listed under.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedExpense {
    pub id: RecordId,
    pub record: ExpenseRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_equality_is_numeric() {
        let plain = Amount::parse("10").unwrap();
        let decimal = Amount::parse("10.0").unwrap();
        assert_eq!(plain, decimal);
        assert_eq!(plain.as_str(), "10");
        assert_eq!(decimal.to_string(), "10.0");
    }

    #[test]
    fn amount_rejects_text_and_non_finite_values() {
        for raw in ["abc", "", "12,50", "inf", "NaN"] {
            let err = Amount::parse(raw).expect_err("should reject");
            assert!(err.is_validation(), "unexpected error for {raw}: {err}");
        }
    }

    #[test]
    fn new_trims_fields() {
        let record = ExpenseRecord::new(" 2024-03-01 ", " Food", "12.5 ", " lunch ").unwrap();
        assert_eq!(record.date, "2024-03-01");
        assert_eq!(record.category, "Food");
        assert_eq!(record.amount.as_str(), "12.5");
        assert_eq!(record.description, "lunch");
        assert_eq!(record.parsed_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn new_rejects_missing_fields_and_sentinel() {
        let missing = ExpenseRecord::new("2024-03-01", "Food", "3", "  ").unwrap_err();
        assert_eq!(missing.to_string(), "All fields are required!");

        let sentinel =
            ExpenseRecord::new("2024-03-01", "Add Custom Category", "3", "x").unwrap_err();
        assert_eq!(sentinel.to_string(), "Please select a valid category!");
    }

    #[test]
    fn free_form_dates_are_kept() {
        let record = ExpenseRecord::new("last friday", "Food", "3", "x").unwrap();
        assert_eq!(record.date, "last friday");
        assert!(record.parsed_date().is_none());
    }

    #[test]
    fn record_id_parses_with_or_without_hash() {
        assert_eq!("3".parse::<RecordId>().unwrap().get(), 3);
        assert_eq!("#12".parse::<RecordId>().unwrap().get(), 12);
        assert!("0".parse::<RecordId>().is_err());
        assert!("x".parse::<RecordId>().is_err());
        assert_eq!(RecordId::from_index(0).get(), 1);
        assert_eq!(RecordId::new(4).map(RecordId::index), Some(3));
    }
}
