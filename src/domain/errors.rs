//! Error types surfaced by the repository layer.
//!
//! Absence on reads is encoded in the result (`Option` / empty set), never
//! as an error. Errors are reserved for missing update targets, invalid
//! arguments, and faults raised by the underlying store.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Not found errors (update targets only)
    ApplicationNotFound,
    ApiNotFound,
    SubscriptionNotFound,
    RatingNotFound,

    // Caller errors
    InvalidArgument,

    // Infrastructure errors
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ApplicationNotFound => "APPLICATION_NOT_FOUND",
            ErrorCode::ApiNotFound => "API_NOT_FOUND",
            ErrorCode::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            ErrorCode::RatingNotFound => "RATING_NOT_FOUND",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard repository error with code, message, and optional cause.
///
/// Storage faults are wrapped with `ErrorCode::StorageError` and carry the
/// original cause; callers cannot (and should not) distinguish sub-kinds.
#[derive(Debug)]
pub struct RepositoryError {
    pub code: ErrorCode,
    pub message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl RepositoryError {
    /// Creates a new repository error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a technical error wrapping a fault from the underlying store.
    pub fn technical(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code: ErrorCode::StorageError,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error denotes a missing update target.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ApplicationNotFound
                | ErrorCode::ApiNotFound
                | ErrorCode::SubscriptionNotFound
                | ErrorCode::RatingNotFound
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for RepositoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = RepositoryError::new(ErrorCode::ApiNotFound, "Api not found: echo");
        assert_eq!(format!("{}", err), "[API_NOT_FOUND] Api not found: echo");
        assert!(err.is_not_found());
    }

    #[test]
    fn technical_error_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = RepositoryError::technical("An error occurred while deleting rating", cause);
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }
}
