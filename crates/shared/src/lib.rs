//! Shared library for the rocket-api service
//!
//! This crate provides the infrastructure pieces the service binary builds on:
//! - Configuration management
//! - Database connection pooling and embedded migrations
//! - Error handling types
//! - Logging infrastructure

pub mod config;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use db::DbPool;
pub use error::{Error, Result};

const DEFAULT_LOG_FILTER: &str = "shared=debug,rocket_api=debug,info";

/// Initialize tracing subscriber for structured logging
///
/// `LogFormat::Json` emits one JSON object per line with the current span
/// context, `LogFormat::Pretty` emits human-readable lines. The filter is taken
/// from `RUST_LOG` when set.
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
