#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use actix_session::storage::SessionStore;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar};
use config::Environment;
use mockall::mock;
use tempfile::TempDir;

use fitness_tracker::AppContext;
use fitness_tracker::db::{ConnectionProbe, DbError, DbResult};
use fitness_tracker::models::config::Settings;
use fitness_tracker::session::{SESSION_COOKIE_NAME, USER_ID_KEY};

pub const FRONTEND_URL: &str = "https://app.example.com";

mock! {
    pub Probe {}

    impl ConnectionProbe for Probe {
        fn probe(&self) -> DbResult<()>;
    }
}

/// Settings read from `vars` only, with sessions stored under `sessions`.
pub fn settings_from(vars: &[(&str, &str)], sessions: &TempDir) -> Settings {
    let mut map = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<String, String>>();
    map.insert(
        "SESSION_FILE_DIR".to_string(),
        sessions.path().display().to_string(),
    );
    Settings::from_source(Environment::default().source(Some(map.into_iter().collect())))
}

pub fn context(vars: &[(&str, &str)], probe: impl ConnectionProbe + 'static) -> (AppContext, TempDir) {
    let sessions = tempfile::tempdir().expect("create session dir");
    let settings = settings_from(vars, &sessions);
    (AppContext::new(settings, Arc::new(probe)), sessions)
}

pub fn healthy_probe() -> MockProbe {
    let mut probe = MockProbe::new();
    probe.expect_probe().returning(|| Ok(()));
    probe
}

pub fn failing_probe(message: &'static str) -> MockProbe {
    let mut probe = MockProbe::new();
    probe
        .expect_probe()
        .returning(move || Err(DbError::Connection(message.to_string())));
    probe
}

/// Stores a signed-in session for `user_id` and returns its signed cookie.
pub async fn signed_in_cookie(context: &AppContext, user_id: i64) -> Cookie<'static> {
    session_cookie(context, &[(USER_ID_KEY, user_id.to_string().as_str())]).await
}

/// Stores a session holding `entries` (raw JSON values) and returns its
/// signed cookie.
pub async fn session_cookie(context: &AppContext, entries: &[(&str, &str)]) -> Cookie<'static> {
    let state = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<String, String>>();
    let session_key = context
        .store
        .save(state, &Duration::hours(1))
        .await
        .expect("save session");

    let mut jar = CookieJar::new();
    jar.signed_mut(&context.key).add(Cookie::new(
        SESSION_COOKIE_NAME,
        session_key.as_ref().to_string(),
    ));
    jar.get(SESSION_COOKIE_NAME)
        .expect("signed cookie")
        .clone()
        .into_owned()
}
