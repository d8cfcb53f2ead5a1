//! Server-side sessions: the filesystem store and the middleware wiring.

use actix_session::SessionMiddleware;
use actix_session::config::{BrowserSession, CookieContentSecurity, PersistentSession};
use actix_web::cookie::Key;
use sha2::{Digest, Sha512};

use crate::models::config::SessionPolicy;

pub mod store;

pub use store::FileSessionStore;

pub const SESSION_COOKIE_NAME: &str = "session";

/// Session key holding the identifier of the signed-in user.
pub const USER_ID_KEY: &str = "user_id";

/// Derives the 64-byte cookie signing key from a secret of any length.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Builds the session middleware according to `policy`.
pub fn session_middleware(
    policy: &SessionPolicy,
    store: FileSessionStore,
    key: Key,
) -> SessionMiddleware<FileSessionStore> {
    let content_security = if policy.use_signer {
        CookieContentSecurity::Signed
    } else {
        CookieContentSecurity::Private
    };

    let builder = SessionMiddleware::builder(store, key)
        .cookie_name(SESSION_COOKIE_NAME.to_string())
        .cookie_http_only(true)
        .cookie_secure(policy.secure)
        .cookie_same_site(policy.same_site)
        .cookie_content_security(content_security);

    if policy.permanent {
        builder
            .session_lifecycle(PersistentSession::default())
            .build()
    } else {
        builder.session_lifecycle(BrowserSession::default()).build()
    }
}
