//! Rocket API library
//!
//! Receives rocket telemetry messages, keeps an append-only event log and
//! serves the current state of every rocket. Exposed as a library for the
//! server binaries and the integration tests.

pub mod clock;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod services;
