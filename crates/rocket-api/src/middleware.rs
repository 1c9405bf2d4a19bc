//! Middleware for the rocket API

pub mod metrics;
pub mod request_id;

pub use metrics::{init_metrics, metrics_handler, PrometheusMetrics};
pub use request_id::{request_id, RequestId, RequestIdExt, REQUEST_ID_HEADER};
