use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Sentiment lexicon unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Failed to load input {path}: {reason}")]
    InputLoad { path: PathBuf, reason: String },

    #[error("Failed to write output {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Forum error: {0}")]
    Forum(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn input_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::InputLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn output_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Failures at the output boundary leave already computed statistics valid.
    pub fn is_output_failure(&self) -> bool {
        matches!(self, Error::OutputWrite { .. } | Error::Chart(_))
    }
}
