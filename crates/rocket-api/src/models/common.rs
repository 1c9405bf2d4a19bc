//! Common DTOs shared across resources

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error envelope returned by every failing request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    pub message: String,
    /// Dot-separated, machine readable code
    #[schema(example = "resource.or.entity.rocket.was.not.found")]
    pub error_code: String,
    /// Time-ordered id to correlate the response with the logs
    pub trace_id: Uuid,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_code: error_code.into(),
            trace_id: Uuid::now_v7(),
        }
    }
}
