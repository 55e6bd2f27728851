//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type shared by the validation middleware,
//! the authorization guard and the controller seam.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so every variant is
//! rendered as a JSON body of the form `{"error": "<message>"}` with the matching
//! HTTP status. Field validation failures are the only kind produced by this
//! crate's own logic; the other variants exist so that `Controller` and
//! `Authorizer` implementations can propagate their failures with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can surface from a request.
#[derive(Debug)]
pub enum AppError {
    /// One or more field rules failed (HTTP 400).
    /// Messages are kept in rule-declaration order.
    InvalidFields(Vec<&'static str>),
    /// Represents an unauthorized access attempt (HTTP 401).
    Unauthorized(String),
    /// Represents a client-side error due to a malformed request (HTTP 400).
    BadRequest(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// A route has no collaborator capable of serving it (HTTP 501).
    NotImplemented(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// The client-facing message carried in the `error` field of the response.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidFields(messages) => messages.join(", "),
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::NotImplemented(msg)
            | AppError::InternalServerError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidFields(_) => write!(f, "Invalid Fields: {}", self.message()),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::NotImplemented(msg) => write!(f, "Not Implemented: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFields(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.message()
        }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::BadRequest(format!("Malformed JSON body: {}", error))
    }
}
