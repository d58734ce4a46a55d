//! Error types for the FII screening pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the FII screening pipeline.
///
/// Only refresh-aborting conditions are errors. Row-level validity problems
/// are handled by exclusion during normalization and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure reaching the listing source (connect, timeout,
    /// non-success status).
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Response body did not contain a listing table, or the table's shape
    /// does not match the expected column schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Error::Fetch(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
