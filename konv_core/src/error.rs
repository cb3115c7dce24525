//! Error types for the konv_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A unit symbol that is not present in the unit table.
///
/// This is the only error the conversion engine raises. Numeric edge cases
/// (NaN, infinities, huge or tiny magnitudes) are handled by formatting and
/// never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown unit: '{symbol}'")]
pub struct UnknownUnitError {
    pub symbol: String,
}

impl UnknownUnitError {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// Core error type for konv_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unit table validation error
    #[error("Unit table validation error: {0}")]
    UnitTable(String),

    /// Requested unit is not in the table
    #[error(transparent)]
    UnknownUnit(#[from] UnknownUnitError),

    /// History store error
    #[error("History error: {0}")]
    History(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
