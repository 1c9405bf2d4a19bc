//! Incoming rocket message DTOs

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{DomainError, MessageType, RocketEvent};

/// Message posted by a rocket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "metadata": {
        "channel": "193270a9-c9cf-404a-8f83-838e71d9ae67",
        "messageNumber": 1,
        "messageTime": "2022-02-02T19:39:05.86337+01:00",
        "messageType": "RocketLaunched"
    },
    "message": {
        "type": "Falcon-9",
        "launchSpeed": 500,
        "mission": "ARTEMIS"
    }
}))]
pub struct RocketMessage {
    pub metadata: MessageMetadata,
    /// Type specific payload
    #[serde(default)]
    #[schema(value_type = Object)]
    pub message: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    /// Rocket identifier
    pub channel: Uuid,

    /// Position in the rocket's message sequence, starting at 1
    #[validate(range(
        min = 1,
        code = "rocket.message.should.be.positive",
        message = "Message number must be a positive integer starting from 1"
    ))]
    pub message_number: i32,

    #[schema(value_type = String, format = DateTime)]
    pub message_time: DateTime<FixedOffset>,

    pub message_type: MessageType,
}

impl TryFrom<RocketMessage> for RocketEvent {
    type Error = DomainError;

    fn try_from(value: RocketMessage) -> Result<Self, Self::Error> {
        let metadata = value.metadata;
        RocketEvent::new(
            metadata.channel,
            metadata.message_number,
            metadata.message_time,
            metadata.message_type,
            value.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn launch_json(message_number: i64) -> Value {
        json!({
            "metadata": {
                "channel": "193270a9-c9cf-404a-8f83-838e71d9ae67",
                "messageNumber": message_number,
                "messageTime": "2022-02-02T19:39:05.86337+01:00",
                "messageType": "RocketLaunched"
            },
            "message": {
                "type": "Falcon-9",
                "launchSpeed": 500,
                "mission": "ARTEMIS"
            }
        })
    }

    #[test]
    fn test_deserialize_message() {
        let message: RocketMessage = serde_json::from_value(launch_json(1)).unwrap();
        assert_eq!(message.metadata.message_number, 1);
        assert_eq!(message.metadata.message_type, MessageType::RocketLaunched);
        assert_eq!(message.message["type"], "Falcon-9");
        assert!(message.metadata.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero() {
        let message: RocketMessage = serde_json::from_value(launch_json(0)).unwrap();
        let errors = message.metadata.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let error = &field_errors["message_number"][0];
        assert_eq!(error.code, "rocket.message.should.be.positive");
    }

    #[test]
    fn test_unknown_message_type_is_rejected() {
        let mut body = launch_json(1);
        body["metadata"]["messageType"] = json!("RocketLanded");
        assert!(serde_json::from_value::<RocketMessage>(body).is_err());
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let mut body = launch_json(1);
        body.as_object_mut().unwrap().remove("message");
        let message: RocketMessage = serde_json::from_value(body).unwrap();
        assert!(message.message.is_empty());
    }

    #[test]
    fn test_into_event() {
        let message: RocketMessage = serde_json::from_value(launch_json(3)).unwrap();
        let event = RocketEvent::try_from(message).unwrap();

        assert_eq!(event.message_number(), 3);
        assert_eq!(event.rocket_type().as_deref(), Some("Falcon-9"));
        assert_eq!(
            event.message_time(),
            Utc.with_ymd_and_hms(2022, 2, 2, 18, 39, 5).unwrap()
                + chrono::Duration::microseconds(863_370)
        );
    }

    #[test]
    fn test_into_event_rejects_negative_number() {
        let message: RocketMessage = serde_json::from_value(launch_json(-4)).unwrap();
        assert_eq!(
            RocketEvent::try_from(message).unwrap_err(),
            DomainError::NonPositiveMessageNumber(-4)
        );
    }
}
