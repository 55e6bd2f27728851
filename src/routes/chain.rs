use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use super::Stage;
use crate::auth::authorize_request;
use crate::validation::validate_request;

/// Runs a route's stages in order before handing the request to the handler.
///
/// The first failing stage answers the request itself with the error's
/// response; later stages and the handler do not run.
pub struct StageChain {
    stages: Rc<[Stage]>,
}

impl StageChain {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages: stages.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for StageChain
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = StageChainService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StageChainService {
            service: Rc::new(service),
            stages: Rc::clone(&self.stages),
        }))
    }
}

pub struct StageChainService<S> {
    service: Rc<S>,
    stages: Rc<[Stage]>,
}

impl<S, B> Service<ServiceRequest> for StageChainService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let stages = Rc::clone(&self.stages);

        Box::pin(async move {
            for stage in stages.iter() {
                let passed = match *stage {
                    Stage::Authorize => authorize_request(&req).map_err(Error::from),
                    Stage::Validate(validator) => validate_request(&mut req, validator).await,
                };
                if let Err(err) = passed {
                    return Ok(req.error_response(err).map_into_right_body());
                }
            }
            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}
