//! Perimeter Server — application entry point.

mod api;
mod config;
mod response;

use actix_web::http::StatusCode;
use actix_web::{App, HttpServer, web};
use perimeter_db::repository::SurrealGeofenceRepository;
use perimeter_db::DbManager;
use perimeter_service::GeofenceService;
use surrealdb::engine::remote::ws::Client;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::response::ApiResponse;

/// Domain service over the production repository type.
pub(crate) type AppService = GeofenceService<SurrealGeofenceRepository<Client>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("perimeter=info".parse()?))
        .json()
        .init();

    let config = ServerConfig::from_env();

    let manager = DbManager::connect(&config.db).await?;
    perimeter_db::run_migrations(manager.client()).await?;

    let repository = SurrealGeofenceRepository::new(manager.client().clone());
    let service = web::Data::new(GeofenceService::new(repository));
    let manager = web::Data::new(manager);

    tracing::info!(addr = %config.bind_addr, "Starting Perimeter server");

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(manager.clone())
            // A malformed body is a validation failure; answer with the
            // standard envelope instead of actix's default error body.
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    ApiResponse::fail(
                        StatusCode::BAD_REQUEST,
                        "Failed to parse request body",
                        detail,
                    ),
                )
                .into()
            }))
            .service(api::create)
            .service(api::search)
            .service(api::list)
            .service(api::get_by_id)
            .service(api::update)
            .service(api::remove)
            .service(api::health)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    tracing::info!("Perimeter server stopped.");
    Ok(())
}
