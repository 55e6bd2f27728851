//! Route tables.
//!
//! Each table is a plain list of [`RouteEntry`] values built once at startup.
//! [`register`] turns the list into actix routes: the entry's stages run as a
//! per-route middleware, then the request is dispatched to the registered
//! `Controller`.

pub mod chain;
pub mod health;
pub mod tasks;
pub mod users;

use crate::auth::AuthenticatedPrincipal;
use crate::controller::{Controller, Handler, HandlerCall};
use crate::error::AppError;
use crate::validation::{middleware::read_body, Validator, Variant};
use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use std::fmt;
use std::str::FromStr;

pub use chain::StageChain;

/// Which wiring to use for the user and task tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePolicy {
    /// Reproduces the historical wiring, including its unguarded and
    /// unvalidated routes.
    #[default]
    Compatible,
    /// Attaches every validator and guard that has a matching route, and
    /// requires password confirmations to match.
    Strict,
}

impl FromStr for RoutePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compatible" => Ok(RoutePolicy::Compatible),
            "strict" => Ok(RoutePolicy::Strict),
            other => Err(format!("unknown route policy '{}'", other)),
        }
    }
}

impl fmt::Display for RoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoutePolicy::Compatible => f.write_str("compatible"),
            RoutePolicy::Strict => f.write_str("strict"),
        }
    }
}

/// A step that runs before the handler and may end the request early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Calls the registered `Authorizer`.
    Authorize,
    /// Validates and normalizes the JSON body.
    Validate(Validator),
}

/// One (method, path) pair with its stage chain and terminal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    /// Actix path pattern; parameters are written `{name}`.
    pub path: &'static str,
    pub stages: Vec<Stage>,
    pub handler: Handler,
}

impl RouteEntry {
    pub fn new(method: Method, path: &'static str, handler: Handler) -> Self {
        Self {
            method,
            path,
            stages: Vec::new(),
            handler,
        }
    }

    pub fn get(path: &'static str, handler: Handler) -> Self {
        Self::new(Method::GET, path, handler)
    }

    pub fn post(path: &'static str, handler: Handler) -> Self {
        Self::new(Method::POST, path, handler)
    }

    pub fn put(path: &'static str, handler: Handler) -> Self {
        Self::new(Method::PUT, path, handler)
    }

    pub fn delete(path: &'static str, handler: Handler) -> Self {
        Self::new(Method::DELETE, path, handler)
    }

    pub fn authorize(mut self) -> Self {
        self.stages.push(Stage::Authorize);
        self
    }

    pub fn validate(self, variant: Variant) -> Self {
        self.validate_with(Validator::new(variant))
    }

    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.stages.push(Stage::Validate(validator));
        self
    }

    /// Applies `f` only when `condition` holds.
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition {
            f(self)
        } else {
            self
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.stages.contains(&Stage::Authorize)
    }
}

/// The full table: user routes first, then task routes.
pub fn route_table(policy: RoutePolicy) -> Vec<RouteEntry> {
    let mut entries = users::routes(policy);
    entries.extend(tasks::routes(policy));
    entries
}

/// Returns a `ServiceConfig` callback that registers the table for `policy`.
///
/// The policy is also shared as app data so `/health` can report it.
pub fn config(policy: RoutePolicy) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(policy));
        register(cfg, route_table(policy))
    }
}

/// Registers `entries` in order.
pub fn register(cfg: &mut web::ServiceConfig, entries: Vec<RouteEntry>) {
    for entry in entries {
        log::debug!(
            "route {} {} -> {:?} -> {}",
            entry.method,
            entry.path,
            entry.stages,
            entry.handler
        );
        let handler = entry.handler;
        let mut route = web::method(entry.method).to(
            move |req: HttpRequest,
                  body: web::Bytes,
                  principal: Option<AuthenticatedPrincipal>,
                  controller: web::Data<dyn Controller>| {
                dispatch(handler, req, body, principal, controller)
            },
        );
        if !entry.stages.is_empty() {
            route = route.wrap(StageChain::new(entry.stages));
        }
        cfg.route(entry.path, route);
    }
}

async fn dispatch(
    handler: Handler,
    req: HttpRequest,
    body: web::Bytes,
    principal: Option<AuthenticatedPrincipal>,
    controller: web::Data<dyn Controller>,
) -> Result<HttpResponse, AppError> {
    let params = req
        .match_info()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let call = HandlerCall {
        params,
        body: read_body(&req, &body)?,
        principal: principal.map(|p| p.0),
    };
    controller.handle(handler, call).await
}
