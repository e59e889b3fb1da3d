use std::io;
use thiserror::Error;

/// Custom error types for machtime
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("Incompatible time scales: {0}")]
    IncompatibleScale(String),

    #[error("Unsupported before epoch: {0}")]
    UnsupportedBeforeEpoch(String),

    #[error("Unsupported point type: {0}")]
    UnsupportedPointType(String),

    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new overflow error
    pub fn overflow(msg: impl Into<String>) -> Self {
        Error::Overflow(msg.into())
    }

    /// Creates a new invalid value error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Error::InvalidValue(msg.into())
    }

    /// Creates a new unsupported unit error
    pub fn unsupported_unit(msg: impl Into<String>) -> Self {
        Error::UnsupportedUnit(msg.into())
    }

    /// Creates a new incompatible scale error
    pub fn incompatible_scale(msg: impl Into<String>) -> Self {
        Error::IncompatibleScale(msg.into())
    }

    /// Creates a new before-epoch error
    pub fn unsupported_before_epoch(msg: impl Into<String>) -> Self {
        Error::UnsupportedBeforeEpoch(msg.into())
    }

    /// Creates a new unsupported point type error
    pub fn unsupported_point_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedPointType(msg.into())
    }

    /// Creates a new malformed encoding error
    pub fn malformed_encoding(msg: impl Into<String>) -> Self {
        Error::MalformedEncoding(msg.into())
    }
}
