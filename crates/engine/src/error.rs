//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a submitted quantity is negative.
//! - [`InvalidAmount`] thrown when a quantity cannot be read as a number.
//! - [`KeyNotFound`] thrown when a record id is not in the collection.
//! - [`Persistence`] thrown when the store cannot be read or written.
//! - [`NothingToExport`] thrown when an export is requested on an empty
//!   collection.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Persistence`]: EngineError::Persistence
//!  [`NothingToExport`]: EngineError::NothingToExport
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Nothing to export")]
    NothingToExport,
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// `true` for errors the user fixes by correcting the form input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidAmount(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Persistence(a), Self::Persistence(b)) => a == b,
            (Self::NothingToExport, Self::NothingToExport) => true,
            (Self::UnknownOption(a), Self::UnknownOption(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.to_string() == b.to_string(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
