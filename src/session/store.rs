//! Filesystem-backed [`SessionStore`]: one JSON file per session.

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration;
use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

type SessionState = HashMap<String, String>;

const FILE_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    expires_at: DateTime<Utc>,
    state: SessionState,
}

impl SessionRecord {
    fn new(state: SessionState, ttl: &Duration) -> Self {
        Self {
            expires_at: expiry(ttl),
            state,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[derive(Clone, Debug)]
pub struct FileSessionStore {
    dir: Arc<PathBuf>,
}

impl FileSessionStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Removes expired and unreadable session files. Returns how many were
    /// deleted; a missing directory counts as empty.
    pub fn purge_expired(&self) -> std::io::Result<usize> {
        let entries = match fs::read_dir(self.dir.as_path()) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != FILE_EXTENSION) {
                continue;
            }
            let stale = match read_record(&path) {
                Ok(Some(record)) => record.is_expired(),
                Ok(None) => false,
                Err(_) => true,
            };
            if stale {
                remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Path of the file for `key`, or `None` if the key could escape the
    /// session directory.
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then(|| self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }

    fn write(&self, path: &Path, record: &SessionRecord) -> std::io::Result<()> {
        fs::create_dir_all(self.dir.as_path())?;
        let bytes = serde_json::to_vec(record)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)
    }

    fn save_new(&self, record: SessionRecord) -> Result<SessionKey, anyhow::Error> {
        let key = Uuid::new_v4().simple().to_string();
        let path = self
            .path_for(&key)
            .ok_or_else(|| anyhow::anyhow!("generated an invalid session key"))?;
        self.write(&path, &record)?;
        SessionKey::try_from(key).map_err(other)
    }
}

fn expiry(ttl: &Duration) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(ttl.whole_seconds())
}

fn other(err: impl Display) -> anyhow::Error {
    anyhow::anyhow!("{err}")
}

fn read_record(path: &Path) -> Result<Option<SessionRecord>, LoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(LoadError::Other(err.into())),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| LoadError::Deserialization(e.into()))
}

fn remove_file(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let Some(path) = self.path_for(session_key.as_ref()) else {
            return Ok(None);
        };

        web::block(move || -> Result<Option<SessionState>, LoadError> {
            match read_record(&path)? {
                Some(record) if record.is_expired() => {
                    remove_file(&path).map_err(|e| LoadError::Other(e.into()))?;
                    Ok(None)
                }
                Some(record) => Ok(Some(record.state)),
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| LoadError::Other(other(e)))?
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        let store = self.clone();
        let record = SessionRecord::new(session_state, ttl);

        web::block(move || store.save_new(record))
            .await
            .map_err(|e| SaveError::Other(other(e)))?
            .map_err(|e| {
                log::error!("Failed to save session: {e}");
                SaveError::Other(e)
            })
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        let store = self.clone();
        let record = SessionRecord::new(session_state, ttl);

        web::block(move || -> anyhow::Result<SessionKey> {
            match store.path_for(session_key.as_ref()) {
                Some(path) if path.exists() => {
                    store.write(&path, &record)?;
                    Ok(session_key)
                }
                _ => store.save_new(record),
            }
        })
        .await
        .map_err(|e| UpdateError::Other(other(e)))?
        .map_err(|e| {
            log::error!("Failed to update session: {e}");
            UpdateError::Other(e)
        })
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> anyhow::Result<()> {
        let Some(path) = self.path_for(session_key.as_ref()) else {
            return Ok(());
        };
        let store = self.clone();
        let expires_at = expiry(ttl);

        web::block(move || -> anyhow::Result<()> {
            match read_record(&path).map_err(other)? {
                Some(mut record) => {
                    record.expires_at = expires_at;
                    store.write(&path, &record)?;
                    Ok(())
                }
                None => Ok(()),
            }
        })
        .await
        .map_err(other)?
    }

    async fn delete(&self, session_key: &SessionKey) -> anyhow::Result<()> {
        let Some(path) = self.path_for(session_key.as_ref()) else {
            return Ok(());
        };

        web::block(move || remove_file(&path))
            .await
            .map_err(other)?
            .map_err(Into::into)
    }
}
