//! HTTP error taxonomy
//!
//! Every failure leaving a handler is an [`ApiError`], rendered as the JSON
//! [`ErrorResponse`] envelope. Extractor failures are routed here through the
//! `*_config()` helpers so malformed input gets the same envelope.

use actix_web::{
    http::StatusCode,
    web::{JsonConfig, PathConfig, QueryConfig},
    HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::domain::DomainError;
use crate::models::ErrorResponse;

const VALIDATION_ERROR: &str = "validation.error";
const INTERNAL_SERVER_ERROR: &str = "internal.server.error";
const RESOURCE_NOT_FOUND: &str = "resource.not.found";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input; `code` is the full error code
    #[error("{message}")]
    Validation { code: String, message: String },

    #[error("The resource or entity {resource} with id {id} was not found during request or business logic flow.")]
    NotFound { resource: &'static str, id: String },

    /// No route matches the request
    #[error("No endpoint {0}.")]
    ResourceNotFound(String),

    #[error("Internal service error occurred")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Validation error with the generic code
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            code: VALIDATION_ERROR.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn error_code(&self) -> String {
        match self {
            Self::Validation { code, .. } => code.clone(),
            Self::NotFound { resource, .. } => {
                format!("resource.or.entity.{resource}.was.not.found")
            }
            Self::ResourceNotFound(_) => RESOURCE_NOT_FOUND.to_string(),
            Self::Internal(_) => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation {
            code: format!("{VALIDATION_ERROR}.{}", err.code()),
            message: err.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = ErrorResponse::new(status.as_u16(), self.to_string(), self.error_code());

        match self {
            Self::Internal(err) => {
                tracing::error!(trace_id = %body.trace_id, error = ?err, "Unexpected error occurred");
            }
            _ => {
                tracing::debug!(
                    trace_id = %body.trace_id,
                    error_code = %body.error_code,
                    "Request rejected: {}",
                    body.message
                );
            }
        }

        HttpResponse::build(status).json(body)
    }
}

/// JSON body extractor rejecting malformed payloads with a 400 envelope
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

pub fn path_config() -> PathConfig {
    PathConfig::default().error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

pub fn query_config() -> QueryConfig {
    QueryConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: ApiError) -> Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_domain_error_maps_to_validation() {
        let err: ApiError = DomainError::NonPositiveMessageNumber(0).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let json = body_json(err).await;
        assert_eq!(json["status"], 400);
        assert_eq!(json["errorCode"], "validation.error.rocket.message.should.be.positive");
        assert_eq!(
            json["message"],
            "Message number must be a positive integer starting from 1"
        );
    }

    #[actix_web::test]
    async fn test_not_found_envelope() {
        let err = ApiError::not_found("rocket", "193270a9-c9cf-404a-8f83-838e71d9ae67");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let json = body_json(err).await;
        assert_eq!(json["status"], 404);
        assert_eq!(json["errorCode"], "resource.or.entity.rocket.was.not.found");
        assert_eq!(
            json["message"],
            "The resource or entity rocket with id 193270a9-c9cf-404a-8f83-838e71d9ae67 was not found during request or business logic flow."
        );
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let err = ApiError::from(anyhow::anyhow!("connection refused on 10.0.0.3"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(err).await;
        assert_eq!(json["status"], 500);
        assert_eq!(json["errorCode"], "internal.server.error");
        assert_eq!(json["message"], "Internal service error occurred");
        assert!(!json.to_string().contains("10.0.0.3"));
    }

    #[actix_web::test]
    async fn test_unknown_route_envelope() {
        let json = body_json(ApiError::ResourceNotFound("GET /nowhere".to_string())).await;
        assert_eq!(json["status"], 404);
        assert_eq!(json["errorCode"], "resource.not.found");
        assert_eq!(json["message"], "No endpoint GET /nowhere.");
    }

    #[actix_web::test]
    async fn test_trace_id_is_uuid_v7() {
        let json = body_json(ApiError::bad_request("nope")).await;
        let trace_id = uuid::Uuid::parse_str(json["traceId"].as_str().unwrap()).unwrap();
        assert_eq!(trace_id.get_version_num(), 7);
        assert_eq!(json["errorCode"], "validation.error");
    }
}
