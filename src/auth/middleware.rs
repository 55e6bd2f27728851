use super::Authorizer;
use crate::error::AppError;
use actix_web::{dev::ServiceRequest, web, HttpMessage};

/// Runs the registered `Authorizer` and stores the resulting `Principal` in the
/// request extensions.
///
/// Fails with `AppError::InternalServerError` when no authorizer is registered,
/// and with whatever error the authorizer returns otherwise.
pub fn authorize_request(req: &ServiceRequest) -> Result<(), AppError> {
    let authorizer = req
        .app_data::<web::Data<dyn Authorizer>>()
        .ok_or_else(|| AppError::InternalServerError("No authorizer configured".into()))?;

    match authorizer.authorize(req.request()) {
        Ok(principal) => {
            log::debug!("authorized {} {} for {}", req.method(), req.path(), principal.subject);
            req.extensions_mut().insert(principal);
            Ok(())
        }
        Err(err) => {
            log::debug!("authorization failed for {} {}: {}", req.method(), req.path(), err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{bearer_token, Principal};
    use actix_web::{test, HttpRequest};
    use std::sync::Arc;

    struct TokenIsSubject;

    impl Authorizer for TokenIsSubject {
        fn authorize(&self, req: &HttpRequest) -> Result<Principal, AppError> {
            bearer_token(req)
                .map(Principal::new)
                .ok_or_else(|| AppError::Unauthorized("Missing token".into()))
        }
    }

    fn authorizer() -> web::Data<dyn Authorizer> {
        web::Data::from(Arc::new(TokenIsSubject) as Arc<dyn Authorizer>)
    }

    #[::core::prelude::v1::test]
    fn test_principal_is_stored_in_extensions() {
        let req = test::TestRequest::default()
            .app_data(authorizer())
            .insert_header(("Authorization", "Bearer user-7"))
            .to_srv_request();

        authorize_request(&req).unwrap();
        assert_eq!(
            req.extensions().get::<Principal>(),
            Some(&Principal::new("user-7"))
        );
    }

    #[::core::prelude::v1::test]
    fn test_authorizer_error_is_returned() {
        let req = test::TestRequest::default()
            .app_data(authorizer())
            .to_srv_request();

        match authorize_request(&req) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Missing token"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(req.extensions().get::<Principal>().is_none());
    }

    #[::core::prelude::v1::test]
    fn test_missing_authorizer_is_an_internal_error() {
        let req = test::TestRequest::default().to_srv_request();
        assert!(matches!(
            authorize_request(&req),
            Err(AppError::InternalServerError(_))
        ));
    }
}
