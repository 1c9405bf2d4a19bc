//! Rocket domain model
//!
//! Pure value types and the replay algorithm that turns a rocket's message
//! log into its current state. Nothing in here touches the database or HTTP.

pub mod event;
pub mod snapshot;
pub mod sort;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

pub use event::RocketEvent;
pub use snapshot::RocketSnapshot;
pub use sort::{RocketSort, SortField, SortOrder};
pub use state::{RocketState, SNAPSHOT_INTERVAL};

/// Domain rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Message number must be a positive integer starting from 1")]
    NonPositiveMessageNumber(i32),

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("Unknown rocket status: {0}")]
    UnknownRocketStatus(String),
}

impl DomainError {
    /// Stable, dot-separated code used in error responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveMessageNumber(_) => "rocket.message.should.be.positive",
            Self::UnknownMessageType(_) => "rocket.message.type.unknown",
            Self::UnknownRocketStatus(_) => "rocket.status.unknown",
        }
    }
}

/// Kind of an incoming rocket message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MessageType {
    RocketLaunched,
    RocketSpeedIncreased,
    RocketSpeedDecreased,
    RocketMissionChanged,
    RocketExploded,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RocketLaunched => "RocketLaunched",
            Self::RocketSpeedIncreased => "RocketSpeedIncreased",
            Self::RocketSpeedDecreased => "RocketSpeedDecreased",
            Self::RocketMissionChanged => "RocketMissionChanged",
            Self::RocketExploded => "RocketExploded",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RocketLaunched" => Ok(Self::RocketLaunched),
            "RocketSpeedIncreased" => Ok(Self::RocketSpeedIncreased),
            "RocketSpeedDecreased" => Ok(Self::RocketSpeedDecreased),
            "RocketMissionChanged" => Ok(Self::RocketMissionChanged),
            "RocketExploded" => Ok(Self::RocketExploded),
            other => Err(DomainError::UnknownMessageType(other.to_string())),
        }
    }
}

/// Lifecycle status of a rocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RocketStatus {
    /// Messages were received but no launch has been applied yet
    Pending,
    Launched,
    Exploded,
}

impl RocketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Launched => "launched",
            Self::Exploded => "exploded",
        }
    }
}

impl fmt::Display for RocketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RocketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "launched" => Ok(Self::Launched),
            "exploded" => Ok(Self::Exploded),
            other => Err(DomainError::UnknownRocketStatus(other.to_string())),
        }
    }
}
