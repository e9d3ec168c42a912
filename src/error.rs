//! Custom error types for Expensio
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every variant is meant to be shown to the
//! user as-is; nothing here is retried automatically.

use std::fmt;

use thiserror::Error;

/// A single failed form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field (e.g. "title", "email")
    pub field: &'static str,
    /// Message displayed next to the field
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors collected from one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a specific field, if it failed
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Convert into a `Result`, failing when any field error was recorded
    pub fn into_result(self) -> Result<(), ExpensioError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ExpensioError::Validation(self))
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(err: FieldError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// The main error type for Expensio operations
#[derive(Error, Debug)]
pub enum ExpensioError {
    /// No signed-in identity for an operation that needs one
    #[error("Please sign in to continue.")]
    Unauthenticated,

    /// Entry-time field checks failed
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Subscription or write failure reported by the record store
    #[error("Store error: {0}")]
    Store(String),

    /// Sign-in, sign-up and session failures
    #[error("{0}")]
    Auth(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpensioError {
    /// Build a validation error for a single field
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(FieldError::new(field, message).into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means nobody is signed in
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Field errors carried by a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExpensioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpensioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpensioError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for Expensio operations
pub type ExpensioResult<T> = Result<T, ExpensioError>;
