//! Request handlers for API endpoints

pub mod health;
pub mod helpers;
pub mod messages;
pub mod rockets;

pub use health::*;
pub use messages::*;
pub use rockets::*;
