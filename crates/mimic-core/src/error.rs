//! Error types for the Mimic engine.

use thiserror::Error;

use crate::activity::ActivityId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid landmark shape at {path}: {reason}")]
    InvalidShape { path: String, reason: String },

    #[error("Non-finite score produced during {stage}")]
    NonFiniteScore { stage: &'static str },

    #[error("Activity not found: {0}")]
    ActivityNotFound(ActivityId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
