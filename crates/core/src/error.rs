//! Stock error model.

use thiserror::Error;

/// Result type used across the stock crates.
pub type StockResult<T> = Result<T, StockError>;

/// Fatal stock-resolution error.
///
/// Every variant is an integration/programmer error and is reported immediately.
/// Per-item defects (missing or blank product references) are never errors; they
/// are filtered out by the resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The caller omitted the query (or the request/result container around it).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The adjuster was handed no record sequence.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl StockError {
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
