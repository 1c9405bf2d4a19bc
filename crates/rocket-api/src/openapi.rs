//! OpenAPI documentation
//!
//! Generated by utoipa from the DTOs and the handler annotations, served at
//! `/v3/api-docs` with Swagger UI under `/swagger-ui/`.

use utoipa::OpenApi;

use crate::domain::{MessageType, RocketStatus};
use crate::handlers;
use crate::handlers::health::HealthResponse;
use crate::models::{ErrorResponse, MessageMetadata, RocketMessage, RocketResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rocket API",
        version = "1.0.0",
        description = "Collects rocket telemetry messages, which may arrive duplicated or out of order, and serves the current state of every rocket.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server")
    ),
    tags(
        (name = "Messages", description = "Rocket message intake"),
        (name = "Rockets", description = "Current rocket states"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        handlers::post_message,
        handlers::get_rocket,
        handlers::list_rockets,
        handlers::health_check,
    ),
    components(
        schemas(
            RocketMessage,
            MessageMetadata,
            MessageType,
            RocketResponse,
            RocketStatus,
            ErrorResponse,
            HealthResponse,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/messages"));
        assert!(paths.iter().any(|p| p.as_str() == "/rockets"));
        assert!(paths.iter().any(|p| p.as_str() == "/rockets/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("RocketMessage"));
        assert!(json.contains("ErrorResponse"));
    }
}
