//! Error types for mapping operations.

use thiserror::Error;

/// Error type for column selection, fitting, transforming and persistence.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A referenced column does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// An array has a shape the caller cannot accept.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Feature dimension differs from the one seen during fit.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// A transform was requested before fit.
    #[error("Not fitted: {0}")]
    NotFitted(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Invalid parameter or argument value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Data contains missing values (NaN) when not expected.
    #[error("Missing values: {0}")]
    MissingValues(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parsing error while loading a table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Error raised by a user-supplied transformation unit.
    #[error(transparent)]
    Unit(Box<dyn std::error::Error + Send + Sync>),
}

impl MapperError {
    /// Wrap an arbitrary error raised inside a user transformation unit.
    pub fn unit<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        MapperError::Unit(err.into())
    }
}

impl From<bincode::Error> for MapperError {
    fn from(err: bincode::Error) -> Self {
        MapperError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for MapperError {
    fn from(err: serde_json::Error) -> Self {
        MapperError::Serialization(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = MapperError> = std::result::Result<T, E>;
