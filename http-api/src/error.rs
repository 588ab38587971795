//! Error handling for the HTTP surface
//!
//! Maps internal to-do errors to status codes and response bodies.

use ::todo_core::{FieldError, ToDoError};
use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// `type` member of validation problem bodies
pub const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";

/// `title` member of validation problem bodies
pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";

/// Field key used for errors that concern the whole body
pub const BODY_FIELD: &str = "$";

/// HTTP-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Problem-details body for client errors that carry one
    ///
    /// Field errors are grouped by field name, each with its list of
    /// messages.
    pub fn to_problem_details(&self) -> Option<Value> {
        let errors = match self {
            ApiError::Validation(field_errors) => {
                let mut errors = Map::new();
                for error in field_errors {
                    let messages = errors
                        .entry(error.field.clone())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    if let Value::Array(list) = messages {
                        list.push(Value::String(error.message.clone()));
                    }
                }
                errors
            }
            ApiError::MalformedBody(message) => {
                let mut errors = Map::new();
                errors.insert(BODY_FIELD.to_string(), json!([message]));
                errors
            }
            _ => return None,
        };

        Some(json!({
            "type": VALIDATION_PROBLEM_TYPE,
            "title": VALIDATION_PROBLEM_TITLE,
            "status": StatusCode::BAD_REQUEST.as_u16(),
            "errors": errors
        }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        match self.to_problem_details() {
            Some(body) => (
                status,
                [(header::CONTENT_TYPE, "application/problem+json")],
                body.to_string(),
            )
                .into_response(),
            None => status.into_response(),
        }
    }
}

/// Convert from ToDoError to ApiError
impl From<ToDoError> for ApiError {
    fn from(err: ToDoError) -> Self {
        match err {
            ToDoError::NotFound(msg) => ApiError::NotFound(msg),
            ToDoError::Validation(errors) => ApiError::Validation(errors),
            ToDoError::Database(msg) => ApiError::Internal(format!("Database error: {msg}")),
            ToDoError::Configuration(msg) => {
                ApiError::Internal(format!("Configuration error: {msg}"))
            }
            ToDoError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Convert from axum's JSON body rejection
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::UnsupportedMediaType(rejection.body_text())
            }
            _ => ApiError::MalformedBody(rejection.body_text()),
        }
    }
}
