//! Route configuration for the API

use actix_web::web;

use crate::{error, handlers, middleware};

/// Configure all routes and extractor error handling
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .route("/health", web::get().to(handlers::health_check))
        .route("/metrics", web::get().to(middleware::metrics_handler))
        .route("/messages", web::post().to(handlers::post_message))
        .service(
            web::scope("/rockets")
                .route("", web::get().to(handlers::list_rockets))
                .route("/{id}", web::get().to(handlers::get_rocket)),
        );
}
