//! Response payloads of the API endpoints.

pub mod auth;
pub mod health;
