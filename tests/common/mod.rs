#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse};
use futures::future::{self, LocalBoxFuture};
use serde_json::json;
use std::sync::{Arc, Mutex};
use taskgate::auth::bearer_token;
use taskgate::routes::{self, health};
use taskgate::{AppError, Authorizer, Controller, Handler, HandlerCall, Principal, RoutePolicy};

pub const VALID_TOKEN: &str = "valid-token";

/// Shared, ordered record of what the stages and handlers did.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Echoes every call back as JSON and records it.
pub struct RecordingController {
    pub log: EventLog,
}

impl Controller for RecordingController {
    fn handle<'a>(
        &'a self,
        handler: Handler,
        call: HandlerCall,
    ) -> LocalBoxFuture<'a, Result<HttpResponse, AppError>> {
        self.log.push(format!("handler:{}", handler));
        Box::pin(future::ready(Ok(HttpResponse::Ok().json(json!({
            "handler": handler.name(),
            "params": call.params,
            "body": call.body,
            "principal": call.principal.map(|p| p.subject),
        })))))
    }
}

/// Accepts only `Authorization: Bearer valid-token`, as user `user-1`.
pub struct TokenAuthorizer {
    pub log: EventLog,
}

impl Authorizer for TokenAuthorizer {
    fn authorize(&self, req: &HttpRequest) -> Result<Principal, AppError> {
        self.log.push("authorize");
        match bearer_token(req) {
            Some(VALID_TOKEN) => Ok(Principal::new("user-1")),
            Some(_) => Err(AppError::Unauthorized("Invalid token".into())),
            None => Err(AppError::Unauthorized("Missing token".into())),
        }
    }
}

pub fn build_app(
    policy: RoutePolicy,
    log: &EventLog,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let controller: Arc<dyn Controller> = Arc::new(RecordingController { log: log.clone() });
    let authorizer: Arc<dyn Authorizer> = Arc::new(TokenAuthorizer { log: log.clone() });

    App::new()
        .app_data(web::Data::from(controller))
        .app_data(web::Data::from(authorizer))
        .wrap(Logger::default())
        .service(health::health)
        .configure(routes::config(policy))
}
