//! The authorization seam.
//!
//! Verifying credentials is the host application's job. It plugs in by
//! registering an `Authorizer` as `web::Data<dyn Authorizer>`; routes guarded
//! by [`crate::routes::Stage::Authorize`] call it before anything else runs.

pub mod extractors;
pub mod middleware;

use crate::error::AppError;
use actix_web::{http::header, HttpRequest};
use serde::{Deserialize, Serialize};

pub use extractors::AuthenticatedPrincipal;
pub use middleware::authorize_request;

/// The identity established by a successful authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier of the authenticated user.
    pub subject: String,
}

impl Principal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// Decides whether a request may proceed, and on whose behalf.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, req: &HttpRequest) -> Result<Principal, AppError>;
}

/// Returns the token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}
