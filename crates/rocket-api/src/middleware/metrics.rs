//! Prometheus metrics
//!
//! HTTP middleware recording, per method, route pattern and status:
//! - `http_requests_total` - Counter of HTTP requests
//! - `http_request_duration_seconds` - Histogram of request durations
//! - `http_requests_in_flight` - Gauge of concurrent requests
//!
//! plus the recorder setup and the `/metrics` scrape endpoint. Rocket counters
//! (`rocket_messages_total`, `rocket_snapshots_total`,
//! `rocket_stale_recomputations_total`) are recorded by the service layer and
//! described here.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::{
    future::{ready, Ready},
    sync::Arc,
    time::Instant,
};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder
///
/// Must run before any metric is recorded; later calls return the same handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PROMETHEUS_HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;

            describe_counter!(
                "http_requests_total",
                "Total number of HTTP requests processed"
            );
            describe_histogram!(
                "http_request_duration_seconds",
                "HTTP request duration in seconds"
            );
            describe_gauge!(
                "http_requests_in_flight",
                "Number of HTTP requests currently being processed"
            );
            describe_counter!(
                "rocket_messages_total",
                "Rocket messages received, by outcome (accepted, duplicate)"
            );
            describe_counter!("rocket_snapshots_total", "Rocket state snapshots stored");
            describe_counter!(
                "rocket_stale_recomputations_total",
                "Rocket state recomputations that stopped at a gap"
            );

            Ok(handle)
        })
        .cloned()
}

/// Prometheus text exposition of all recorded metrics
pub async fn metrics_handler() -> HttpResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4; charset=utf-8")
            .body(handle.render()),
        None => HttpResponse::ServiceUnavailable().body("metrics recorder not installed"),
    }
}

#[derive(Clone)]
pub struct PrometheusMetrics {
    /// Path prefixes not recorded
    excluded_paths: Arc<Vec<String>>,
}

impl Default for PrometheusMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        Self::with_excluded_paths(vec!["/metrics".to_string(), "/health".to_string()])
    }

    pub fn with_excluded_paths(paths: Vec<String>) -> Self {
        Self {
            excluded_paths: Arc::new(paths),
        }
    }
}

fn is_excluded(excluded_paths: &[String], path: &str) -> bool {
    excluded_paths.iter().any(|p| path.starts_with(p.as_str()))
}

impl<S, B> Transform<S, ServiceRequest> for PrometheusMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PrometheusMetricsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PrometheusMetricsMiddleware {
            service,
            excluded_paths: self.excluded_paths.clone(),
        }))
    }
}

pub struct PrometheusMetricsMiddleware<S> {
    service: S,
    excluded_paths: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for PrometheusMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_excluded(&self.excluded_paths, req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let start = Instant::now();
        let method = req.method().to_string();
        let path = route_label(&req);

        gauge!("http_requests_in_flight").increment(1.0);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            gauge!("http_requests_in_flight").decrement(1.0);

            let status = match &result {
                Ok(response) => response.status(),
                Err(e) => e.as_response_error().status_code(),
            };
            record_request(method, path, status.as_u16(), start.elapsed().as_secs_f64());

            result.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn record_request(method: String, path: String, status: u16, duration: f64) {
    let status = status.to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);
}

/// `path` label of requests no route matches
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Matched route pattern (`/rockets/{id}`), never the raw path
fn route_label(req: &ServiceRequest) -> String {
    req.match_pattern().unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
