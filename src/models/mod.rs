//! Configuration and request-scoped models shared across handlers.

pub mod auth;
pub mod config;
