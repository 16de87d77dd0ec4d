//! Error types for carmelia

use thiserror::Error;

/// Main error type for carmelia
#[derive(Error, Debug)]
pub enum CarmeliaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unterminated quote in command")]
    UnterminatedQuote,

    #[error("Empty curl command")]
    EmptyCommand,

    #[error("No URL found in curl command")]
    NoUrlFound,

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot export an empty collection as {format}")]
    EmptyCollection { format: String },

    #[error("Environment {0:?} not found")]
    EnvNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, CarmeliaError>;
