//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] returned when user input breaks a form rule.
//! - [`InvalidMonth`] returned when a `yyyy-mm` key cannot be parsed.
//! - [`InvalidAmount`] returned when an amount cannot be parsed.
//! - [`InvalidDate`] returned when a calendar date does not exist.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidMonth`]: EngineError::InvalidMonth
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl EngineError {
    pub(crate) fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }
}
