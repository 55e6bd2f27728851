use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use taskgate::config::Config;
use taskgate::controller::Unwired;
use taskgate::routes::{self, health};
use taskgate::{Authorizer, Controller};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let controller: Arc<dyn Controller> = Arc::new(Unwired);
    let authorizer: Arc<dyn Authorizer> = Arc::new(Unwired);
    let policy = config.route_policy;
    let body_limit = config.json_body_limit;

    log::info!(
        "Starting taskgate at {} with {} routes",
        config.server_url(),
        policy
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(controller.clone()))
            .app_data(web::Data::from(authorizer.clone()))
            .app_data(web::PayloadConfig::new(body_limit))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::config(policy))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
