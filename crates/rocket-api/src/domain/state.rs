//! Rocket state projection and the replay algorithm

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{MessageType, RocketEvent, RocketStatus};

/// A snapshot is taken every time this many contiguous messages are processed
pub const SNAPSHOT_INTERVAL: i32 = 80;

/// Current state of a rocket, rebuilt from its events
#[derive(Debug, Clone, PartialEq)]
pub struct RocketState {
    pub channel: Uuid,
    pub rocket_type: Option<String>,
    pub mission: Option<String>,
    pub speed: i32,
    pub status: RocketStatus,
    pub exploded_reason: Option<String>,
    pub launched_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub last_processed_msg_number: i32,
    /// Replay stopped at a gap in message numbers
    pub stale: bool,
}

impl RocketState {
    /// State of a rocket for which nothing has been applied yet
    pub fn empty(channel: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            channel,
            rocket_type: None,
            mission: None,
            speed: 0,
            status: RocketStatus::Pending,
            exploded_reason: None,
            launched_at: None,
            last_updated_at: Some(now),
            last_processed_msg_number: 0,
            stale: false,
        }
    }

    /// Apply `events` in order, stopping at the first gap
    ///
    /// Events must be sorted by message number and start after
    /// `last_processed_msg_number`. When a number other than the expected next
    /// one is found, the state reached so far is returned marked stale.
    pub fn apply_all<'a, I>(self, events: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a RocketEvent>,
    {
        let mut current = self;

        for event in events {
            if event.message_number() != current.last_processed_msg_number + 1 {
                current.stale = true;
                return current;
            }
            current = current.apply(event, now);
        }

        current
    }

    pub fn should_snapshot(&self) -> bool {
        !self.stale
            && self.last_processed_msg_number > 0
            && self.last_processed_msg_number % SNAPSHOT_INTERVAL == 0
    }

    fn apply(mut self, event: &RocketEvent, now: DateTime<Utc>) -> Self {
        match event.message_type() {
            MessageType::RocketLaunched => {
                self.rocket_type = event.rocket_type();
                self.mission = event.mission();
                self.speed = event.launch_speed().unwrap_or(0);
                self.status = RocketStatus::Launched;
                self.exploded_reason = None;
                self.launched_at = Some(event.message_time());
            }
            MessageType::RocketSpeedIncreased => {
                self.speed = self.speed.saturating_add(event.speed_delta().unwrap_or(0));
            }
            MessageType::RocketSpeedDecreased => {
                self.speed = self
                    .speed
                    .saturating_sub(event.speed_delta().unwrap_or(0))
                    .max(0);
            }
            MessageType::RocketMissionChanged => {
                self.mission = event.new_mission();
            }
            MessageType::RocketExploded => {
                self.status = RocketStatus::Exploded;
                self.exploded_reason = event.exploded_reason();
            }
        }

        self.last_updated_at = Some(now);
        self.last_processed_msg_number = event.message_number();
        self
    }
}
