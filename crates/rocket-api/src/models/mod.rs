//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod messages;
pub mod rockets;

pub use common::*;
pub use messages::*;
pub use rockets::*;
