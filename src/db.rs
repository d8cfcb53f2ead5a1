//! Database connection helpers.
//!
//! Connections are opened on demand and never pooled: every caller gets a
//! fresh connection and closes it by dropping it.

use diesel::pg::PgConnection;
use diesel::{Connection, ConnectionResult};
use thiserror::Error;

use crate::models::config::DatabaseSettings;

#[derive(Debug, Error)]
pub enum DbError {
    /// The message is the driver's own description of the failure.
    #[error("{0}")]
    Connection(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<diesel::ConnectionError> for DbError {
    fn from(err: diesel::ConnectionError) -> Self {
        DbError::Connection(err.to_string().trim().to_string())
    }
}

/// Checks that the database accepts connections.
pub trait ConnectionProbe: Send + Sync {
    /// Opens a connection and closes it again without running a query.
    fn probe(&self) -> DbResult<()>;
}

#[derive(Clone, Debug)]
/// PostgreSQL connection factory configured from [`DatabaseSettings`].
pub struct PgDatabase {
    conninfo: String,
}

impl PgDatabase {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            conninfo: settings.conninfo(),
        }
    }

    /// Establishes a new connection. Blocks until libpq connects or gives up.
    pub fn get_connection(&self) -> ConnectionResult<PgConnection> {
        PgConnection::establish(&self.conninfo)
    }
}

impl ConnectionProbe for PgDatabase {
    fn probe(&self) -> DbResult<()> {
        let conn = self.get_connection().map_err(|e| {
            log::warn!("Database connection failed: {e}");
            DbError::from(e)
        })?;
        drop(conn);
        Ok(())
    }
}
