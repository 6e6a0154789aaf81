//! Error types shared across services and commands
//!
//! Per-row lookup failures never show up here: they are folded into
//! `InvoiceResult`s by the lookup client. These types cover what can go
//! wrong around a run (storage, files, configuration, user input).

use thiserror::Error;

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

/// History log errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Saved history is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Batch run errors
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV file is empty")]
    EmptyCsv,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Top-level error surfaced by the command line
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            context: context.into(),
            source,
        }
    }
}
