//! Body returned by the liveness endpoints.

use serde::{Deserialize, Serialize};

pub const DB_CONNECTED: &str = "connected";

/// `{"status":"ok","db":"connected"}` or `{"status":"error","db":"<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthReport {
    Ok { db: String },
    Error { db: String },
}

impl HealthReport {
    pub fn connected() -> Self {
        HealthReport::Ok {
            db: DB_CONNECTED.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        HealthReport::Error { db: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, HealthReport::Ok { .. })
    }
}
