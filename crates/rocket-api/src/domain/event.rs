//! Rocket event: one validated message of a rocket's log

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{DomainError, MessageType};

/// A validated rocket message
///
/// `(channel, message_number)` identifies an event; the payload is kept as the
/// raw JSON object that arrived and interpreted lazily through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketEvent {
    channel: Uuid,
    message_number: i32,
    message_time: DateTime<Utc>,
    message_type: MessageType,
    payload: Map<String, Value>,
}

impl RocketEvent {
    /// Create an event, rejecting message numbers below 1
    pub fn new<Tz: chrono::TimeZone>(
        channel: Uuid,
        message_number: i32,
        message_time: DateTime<Tz>,
        message_type: MessageType,
        payload: Map<String, Value>,
    ) -> Result<Self, DomainError> {
        if message_number < 1 {
            return Err(DomainError::NonPositiveMessageNumber(message_number));
        }

        Ok(Self {
            channel,
            message_number,
            message_time: message_time.with_timezone(&Utc),
            message_type,
            payload,
        })
    }

    pub fn channel(&self) -> Uuid {
        self.channel
    }

    pub fn message_number(&self) -> i32 {
        self.message_number
    }

    pub fn message_time(&self) -> DateTime<Utc> {
        self.message_time
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    // RocketLaunched
    pub fn rocket_type(&self) -> Option<String> {
        self.get_string("type")
    }

    pub fn launch_speed(&self) -> Option<i32> {
        self.get_int("launchSpeed")
    }

    pub fn mission(&self) -> Option<String> {
        self.get_string("mission")
    }

    // RocketSpeedIncreased / RocketSpeedDecreased
    pub fn speed_delta(&self) -> Option<i32> {
        self.get_int("by")
    }

    // RocketMissionChanged
    pub fn new_mission(&self) -> Option<String> {
        self.get_string("newMission")
    }

    // RocketExploded
    pub fn exploded_reason(&self) -> Option<String> {
        self.get_string("reason")
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.payload.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Numbers of any JSON representation, fractions truncated toward zero
    fn get_int(&self, key: &str) -> Option<i32> {
        let Value::Number(number) = self.payload.get(key)? else {
            return None;
        };

        if let Some(value) = number.as_i64() {
            Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        } else {
            // u64 beyond i64 or a float; `as` saturates and truncates
            number.as_f64().map(|value| value as i32)
        }
    }
}
