use super::{route_table, RoutePolicy};
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness check. Sits outside the route tables and never runs stages.
///
/// Reports which wiring is active so a deploy can be checked for the
/// expected policy without sending a guarded request.
#[get("/health")]
pub async fn health(policy: Option<web::Data<RoutePolicy>>) -> impl Responder {
    let policy = policy.map(|p| *p.get_ref()).unwrap_or_default();
    let table = route_table(policy);
    let guarded = table.iter().filter(|entry| entry.is_guarded()).count();

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "route_policy": policy.to_string(),
        "routes": { "total": table.len(), "guarded": guarded },
        "timestamp": Utc::now()
    }))
}
