//! Error types for poststats-core

use thiserror::Error;

/// Main error type for the poststats-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw post record could not be hydrated
    #[error("parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Input glob pattern error
    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Statistic name not known to the factory
    #[error("unknown statistic: {0}")]
    UnknownStatistic(String),

    /// Calculator was used after `calculate()` already ran
    #[error("calculator for {stat} has already been finalized")]
    CalculatorFinalized { stat: String },
}

/// Result type alias for poststats-core
pub type Result<T> = std::result::Result<T, Error>;
