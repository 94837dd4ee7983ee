// ⚠️ Error types
// Business outcomes (duplicate, not found, gate closed) are status enums on the
// entities themselves. Only the conditions below travel as errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    /// Catalog source could not be opened
    #[error("failed to open catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Underlying reader failure while scanning catalog records
    #[error("failed to read catalog records: {0}")]
    Csv(#[from] csv::Error),

    /// Payment would take the balance below zero
    #[error("payment of {requested} exceeds balance of {balance}")]
    InsufficientBalance { requested: f64, balance: f64 },

    /// Student has no account (constructed inactive)
    #[error("student {0} has no account")]
    NoAccount(String),

    #[error("malformed secret id: expected NNN-NN-NNNN")]
    InvalidSecretId,

    #[error("unknown class code: {0}")]
    UnknownClassCode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RecordsError>;
