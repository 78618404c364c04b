use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find closing delimiter '{delimiter}' in {path}")]
    ClosingDelimiterNotFound { path: PathBuf, delimiter: String },

    #[error("No ids left after {max_id} in {path}")]
    IdOverflow { path: PathBuf, max_id: u64 },

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

pub type Result<T> = std::result::Result<T, ImporterError>;
