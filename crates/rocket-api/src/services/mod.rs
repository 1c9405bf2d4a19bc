//! Service layer: rocket use cases on top of the repositories

pub mod rocket_service;

pub use rocket_service::{PgRocketService, ReceiveOutcome, RocketService};
