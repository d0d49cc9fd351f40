//! Error handling for Retail Champions
//!
//! This module defines the main error types used throughout the client
//! and provides a unified error handling strategy.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Main error type for the Retail Champions client
#[derive(Error, Debug)]
pub enum RetailChampionsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        field_errors: FieldErrors,
    },

    #[error("Duplicate record: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Confirmation required: type DELETE to confirm")]
    ConfirmationRequired,

    #[error("Lottery not found: {lottery_id}")]
    LotteryNotFound { lottery_id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Retail Champions operations
pub type Result<T> = std::result::Result<T, RetailChampionsError>;

/// Field-keyed error messages, as shown next to form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field. The first error per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Turn a non-empty set into a validation error
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RetailChampionsError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl RetailChampionsError {
    /// Build an API error without field details
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        RetailChampionsError::Api {
            status,
            message: message.into(),
            field_errors: FieldErrors::default(),
        }
    }

    /// Field errors carried by this error, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            RetailChampionsError::Validation(errors) => Some(errors),
            RetailChampionsError::Api { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }

    /// Message suitable for a transient user notification
    pub fn user_message(&self) -> String {
        match self {
            RetailChampionsError::Api { message, .. } => message.clone(),
            RetailChampionsError::Conflict(message) => message.clone(),
            RetailChampionsError::Network(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            RetailChampionsError::Network(_) => true,
            RetailChampionsError::Api { status, .. } => *status >= 500,
            RetailChampionsError::Conflict(_) => false,
            RetailChampionsError::Unauthorized(_) => false,
            RetailChampionsError::Validation(_) => true,
            RetailChampionsError::Config(_) => false,
            RetailChampionsError::Storage(_) => false,
            RetailChampionsError::InvalidStateTransition { .. } => true,
            RetailChampionsError::ConfirmationRequired => true,
            RetailChampionsError::LotteryNotFound { .. } => false,
            RetailChampionsError::Serialization(_) => false,
            RetailChampionsError::Io(_) => true,
            RetailChampionsError::UrlParse(_) => false,
            RetailChampionsError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RetailChampionsError::Config(_) => ErrorSeverity::Critical,
            RetailChampionsError::Storage(_) => ErrorSeverity::Critical,
            RetailChampionsError::Unauthorized(_) => ErrorSeverity::Warning,
            RetailChampionsError::Conflict(_) => ErrorSeverity::Warning,
            RetailChampionsError::Validation(_) => ErrorSeverity::Info,
            RetailChampionsError::ConfirmationRequired => ErrorSeverity::Info,
            RetailChampionsError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("phoneNumber", "Phone number is required");
        errors.add("phoneNumber", "Invalid phone number");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("phoneNumber"), Some("Phone number is required"));
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_api_error_user_message() {
        let err = RetailChampionsError::api(400, "Invalid PIN");
        assert_eq!(err.user_message(), "Invalid PIN");
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
