//! The controller seam.
//!
//! Every route ends in one of the [`Handler`]s below. The host application
//! serves them by registering a `Controller` as `web::Data<dyn Controller>`.
//! Persistence, password hashing, token issuance and OTP handling all live
//! behind this trait.

use crate::auth::{Authorizer, Principal};
use crate::error::AppError;
use actix_web::{HttpRequest, HttpResponse};
use futures::future::{self, LocalBoxFuture};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Terminal handlers reachable from the route tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Register,
    VerifyEmail,
    ResendEmailVerification,
    Login,
    ForgotPassword,
    VerifyPasswordOtp,
    ResetPassword,
    AddTask,
    GetAllTasks,
    GetSingleTask,
    EditTask,
    DeleteTask,
}

impl Handler {
    pub fn name(self) -> &'static str {
        match self {
            Handler::Register => "register",
            Handler::VerifyEmail => "verify_email",
            Handler::ResendEmailVerification => "resend_email_verification",
            Handler::Login => "login",
            Handler::ForgotPassword => "forgot_password",
            Handler::VerifyPasswordOtp => "verify_password_otp",
            Handler::ResetPassword => "reset_password",
            Handler::AddTask => "add_task",
            Handler::GetAllTasks => "get_all_tasks",
            Handler::GetSingleTask => "get_single_task",
            Handler::EditTask => "edit_task",
            Handler::DeleteTask => "delete_task",
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a handler receives from the route layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerCall {
    /// Named path segments, e.g. `list_id` or `task_id`.
    pub params: HashMap<String, String>,
    /// The JSON body, already normalized when the route validates it.
    pub body: Value,
    /// Present when the route's chain includes authorization.
    pub principal: Option<Principal>,
}

impl HandlerCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Serves the terminal handlers.
pub trait Controller: Send + Sync {
    fn handle<'a>(
        &'a self,
        handler: Handler,
        call: HandlerCall,
    ) -> LocalBoxFuture<'a, Result<HttpResponse, AppError>>;
}

/// Stand-in collaborator for a process started without real controllers.
///
/// Every handler answers 501 and every authorization attempt is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unwired;

impl Controller for Unwired {
    fn handle<'a>(
        &'a self,
        handler: Handler,
        _call: HandlerCall,
    ) -> LocalBoxFuture<'a, Result<HttpResponse, AppError>> {
        log::warn!("no controller wired for handler {}", handler);
        Box::pin(future::ready(Err(AppError::NotImplemented(format!(
            "Handler {} is not available",
            handler
        )))))
    }
}

impl Authorizer for Unwired {
    fn authorize(&self, req: &HttpRequest) -> Result<Principal, AppError> {
        log::warn!("no authorizer wired, refusing {} {}", req.method(), req.path());
        Err(AppError::Unauthorized("Authorization is not available".into()))
    }
}
