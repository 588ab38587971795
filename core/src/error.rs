use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for to-do operations
pub type Result<T> = std::result::Result<T, ToDoError>;

/// A single rejected field, as reported by the validation layer.
///
/// `field` uses the PascalCase member name (`Title`, `CompletePercent`, ...)
/// so that clients see the same keys regardless of the casing they sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Error types for the to-do service.
///
/// Each variant maps to exactly one HTTP status; anything that is not a
/// missing record or a rejected field is a server fault.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::{FieldError, ToDoError};
///
/// let not_found = ToDoError::not_found_id(42);
/// assert!(not_found.is_not_found());
///
/// let invalid = ToDoError::Validation(vec![FieldError::new("Title", "The Title field is required.")]);
/// assert!(invalid.is_validation());
/// assert_eq!(invalid.field_errors()[0].field, "Title");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToDoError {
    /// No record exists with the given identifier
    #[error("To-do not found: {0}")]
    NotFound(String),

    /// One or more fields violate their constraints
    #[error("Validation error: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Storage operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToDoError {
    /// Create a not found error for a record ID
    pub fn not_found_id(id: i32) -> Self {
        Self::NotFound(format!("To-do with ID {id} not found"))
    }

    /// Field errors carried by a validation failure, empty for other variants
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ToDoError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ToDoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, ToDoError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, ToDoError::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = ToDoError::not_found_id(42);
        assert_eq!(error, ToDoError::NotFound("To-do with ID 42 not found".to_string()));
        assert!(error.is_not_found());

        let error = ToDoError::Validation(vec![FieldError::new("Title", "The Title field is required.")]);
        assert!(error.is_validation());
        assert_eq!(error.field_errors().len(), 1);
        assert_eq!(error.field_errors()[0].field, "Title");
    }

    #[test]
    fn test_error_display() {
        let error = ToDoError::NotFound("gone".to_string());
        assert_eq!(format!("{error}"), "To-do not found: gone");

        let error = ToDoError::Validation(vec![
            FieldError::new("Title", "too long"),
            FieldError::new("CompletePercent", "out of range"),
        ]);
        assert_eq!(
            format!("{error}"),
            "Validation error: Title: too long; CompletePercent: out of range"
        );

        let error = ToDoError::Database("locked".to_string());
        assert_eq!(format!("{error}"), "Database error: locked");
    }

    #[test]
    fn test_error_predicates() {
        assert!(ToDoError::NotFound("test".to_string()).is_not_found());
        assert!(!ToDoError::Validation(vec![]).is_not_found());

        assert!(ToDoError::Validation(vec![]).is_validation());
        assert!(!ToDoError::Database("test".to_string()).is_validation());

        assert!(ToDoError::Database("test".to_string()).is_database());
        assert!(!ToDoError::Internal("test".to_string()).is_database());
        assert!(ToDoError::Internal("test".to_string()).field_errors().is_empty());
    }
}
