//! Rocket API server
//!
//! REST API receiving rocket messages and serving rocket states.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use shared::{db, Config};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rocket_api::clock::SystemClock;
use rocket_api::handlers;
use rocket_api::middleware::{self, PrometheusMetrics, RequestId};
use rocket_api::openapi::ApiDoc;
use rocket_api::routes;
use rocket_api::services::{PgRocketService, RocketService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    shared::init_tracing(config.logging.format);

    tracing::info!("Starting Rocket API...");

    let db_pool = db::create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        db::run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    db::check_health(&db_pool)
        .await
        .context("Database health check failed")?;

    middleware::init_metrics().context("Failed to install Prometheus recorder")?;

    let service: Arc<dyn RocketService> =
        Arc::new(PgRocketService::new(db_pool.clone(), Arc::new(SystemClock)));
    let service = web::Data::from(service);

    let server_addr = config.server.bind_address();
    tracing::info!("Rocket API listening on {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(PrometheusMetrics::new())
            .wrap(RequestId::new())
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(service.clone())
            .configure(routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/v3/api-docs", ApiDoc::openapi()),
            )
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind to {}", server_addr))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}
