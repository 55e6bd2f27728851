use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use super::Principal;
use crate::error::AppError;

/// Extracts the `Principal` stored by the authorization stage.
///
/// Only routes whose chain includes `Stage::Authorize` carry one. Use
/// `Option<AuthenticatedPrincipal>` on routes that may be unguarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal(pub Principal);

impl FromRequest for AuthenticatedPrincipal {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().cloned() {
            Some(principal) => ready(Ok(AuthenticatedPrincipal(principal))),
            None => {
                let err = AppError::Unauthorized("Request has not been authorized".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
