//! Replay checkpoint of a rocket state

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{RocketState, RocketStatus};

/// Copy of a non-stale rocket state at a given message number
#[derive(Debug, Clone, PartialEq)]
pub struct RocketSnapshot {
    pub channel: Uuid,
    pub at_message_number: i32,
    pub rocket_type: Option<String>,
    pub mission: Option<String>,
    pub speed: i32,
    pub status: RocketStatus,
    pub exploded_reason: Option<String>,
    pub launched_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RocketSnapshot {
    pub fn from_state(state: &RocketState, now: DateTime<Utc>) -> Self {
        Self {
            channel: state.channel,
            at_message_number: state.last_processed_msg_number,
            rocket_type: state.rocket_type.clone(),
            mission: state.mission.clone(),
            speed: state.speed,
            status: state.status,
            exploded_reason: state.exploded_reason.clone(),
            launched_at: state.launched_at,
            created_at: Some(now),
        }
    }

    /// Base state for a replay starting after this snapshot
    pub fn to_state(&self) -> RocketState {
        RocketState {
            channel: self.channel,
            rocket_type: self.rocket_type.clone(),
            mission: self.mission.clone(),
            speed: self.speed,
            status: self.status,
            exploded_reason: self.exploded_reason.clone(),
            launched_at: self.launched_at,
            last_updated_at: self.created_at,
            last_processed_msg_number: self.at_message_number,
            stale: false,
        }
    }
}
