#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "Request-body validation, authorization guarding and route wiring for the"]
#![doc = "user and task endpoints of a task management backend. Controllers and the"]
#![doc = "authorizer are supplied by the host through the `Controller` and"]
#![doc = "`Authorizer` traits; the binary (`main.rs`) wires the `Unwired` defaults."]

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod routes;
pub mod validation;

pub use crate::auth::{Authorizer, Principal};
pub use crate::controller::{Controller, Handler, HandlerCall};
pub use crate::error::AppError;
pub use crate::routes::RoutePolicy;
