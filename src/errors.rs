use thiserror::Error;

use crate::ledger::RecordId;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),
    #[error("No expense with id {0}")]
    NotFound(RecordId),
    #[error("Ledger header is malformed: expected `Date,Category,Amount,Description`, found `{found}`")]
    MalformedHeader { found: String },
    #[error("Ledger row on line {line} is malformed: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    /// True for failures caused by user input rather than the files on disk.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_) | LedgerError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
