//! Rocket read DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{RocketSort, RocketState, RocketStatus};

/// Current state of a rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RocketResponse {
    pub id: Uuid,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rocket_type: Option<String>,
    pub speed: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    pub status: RocketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploded_reason: Option<String>,
    /// Messages are missing before the last processed one, newer messages are held back
    pub stale: bool,
}

impl From<RocketState> for RocketResponse {
    fn from(state: RocketState) -> Self {
        Self {
            id: state.channel,
            rocket_type: state.rocket_type,
            speed: state.speed,
            mission: state.mission,
            status: state.status,
            exploded_reason: state.exploded_reason,
            stale: state.stale,
        }
    }
}

/// Query parameters for listing rockets
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRocketsQuery {
    /// `type` (default), `speed`, `mission` or `status`
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_order: Option<String>,
}

impl ListRocketsQuery {
    pub fn sort(&self) -> RocketSort {
        RocketSort::parse(self.sort_by.as_deref(), self.sort_order.as_deref())
    }
}
