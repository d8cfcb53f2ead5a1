//! Configuration model loaded from the process environment.

use std::path::PathBuf;

use actix_web::cookie::SameSite;
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_SECRET_KEY: &str = "dev";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SESSION_DIR: &str = "sessions";

/// Raw values as they appear in the environment, keyed by lower-cased name.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    secret_key: Option<String>,
    secure_cookies: Option<String>,
    db_user: Option<String>,
    db_password: Option<String>,
    db_name: Option<String>,
    db_host: Option<String>,
    db_port: Option<String>,
    frontend_url: Option<String>,
    host: Option<String>,
    port: Option<String>,
    session_file_dir: Option<String>,
}

/// Where session state is kept. Only the filesystem backend is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStorage {
    Filesystem,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Cookie and storage behaviour of the session middleware.
pub struct SessionPolicy {
    pub storage: SessionStorage,
    /// `false` means the cookie lives for the browser session only.
    pub permanent: bool,
    /// Signed (tamper-evident) rather than encrypted cookies.
    pub use_signer: bool,
    pub same_site: SameSite,
    pub secure: bool,
    pub directory: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Connection parameters for the PostgreSQL database.
///
/// Missing values are kept as `None` and left out of the connection string,
/// so the failure shows up on the first connection attempt.
pub struct DatabaseSettings {
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Process-wide settings, built once at startup and never mutated.
pub struct Settings {
    pub secret_key: String,
    pub session: SessionPolicy,
    pub database: DatabaseSettings,
    pub frontend_url: Option<String>,
    pub address: String,
    pub port: u16,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn load() -> Self {
        Self::from_source(Environment::default())
    }

    /// Builds the settings from an arbitrary environment source. Never fails:
    /// an unreadable source is logged and treated as empty.
    pub fn from_source(source: Environment) -> Self {
        let raw = Config::builder()
            .add_source(source)
            .build()
            .and_then(|settings| settings.try_deserialize::<RawSettings>());

        let raw = match raw {
            Ok(raw) => raw,
            Err(err) => {
                log::error!("Error reading environment, falling back to defaults: {err}");
                RawSettings::default()
            }
        };

        Self::from(raw)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let secret_key = non_empty(raw.secret_key).unwrap_or_else(|| DEFAULT_SECRET_KEY.into());

        let secure = raw
            .secure_cookies
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        let session = SessionPolicy {
            storage: SessionStorage::Filesystem,
            permanent: false,
            use_signer: true,
            same_site: SameSite::Lax,
            secure,
            directory: non_empty(raw.session_file_dir)
                .unwrap_or_else(|| DEFAULT_SESSION_DIR.into())
                .into(),
        };

        let database = DatabaseSettings {
            user: raw.db_user,
            password: raw.db_password,
            name: raw.db_name,
            host: raw.db_host,
            port: parse_port("DB_PORT", raw.db_port, DEFAULT_DB_PORT),
        };

        Self {
            secret_key,
            session,
            database,
            frontend_url: raw.frontend_url,
            address: non_empty(raw.host).unwrap_or_else(|| DEFAULT_ADDRESS.into()),
            port: parse_port("PORT", raw.port, DEFAULT_PORT),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_port(name: &str, value: Option<String>, default: u16) -> u16 {
    let Some(value) = non_empty(value) else {
        return default;
    };
    match value.trim().parse() {
        Ok(port) => port,
        Err(err) => {
            log::warn!("Ignoring invalid {name} value {value:?} ({err}), using {default}");
            default
        }
    }
}

impl DatabaseSettings {
    /// libpq keyword/value connection string. Absent parameters are omitted
    /// so that libpq applies its own defaults.
    pub fn conninfo(&self) -> String {
        let port = self.port.to_string();
        let params = [
            ("host", self.host.as_deref()),
            ("port", Some(port.as_str())),
            ("user", self.user.as_deref()),
            ("password", self.password.as_deref()),
            ("dbname", self.name.as_deref()),
        ];

        params
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={}", quote(v))))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
