//! Session endpoints of the auth group.
//!
//! Credential checks belong to the account service; this group only reads and
//! clears the session the account service establishes.

use actix_session::Session;
use actix_web::HttpResponse;

use crate::dto::auth::{MessageResponse, SessionStatus};
use crate::errors::ApiResult;
use crate::routes::{Endpoint, RouteGroup, unavailable_public};
use crate::session::USER_ID_KEY;

pub struct AuthRoutes;

impl RouteGroup for AuthRoutes {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/auth/session", session_status),
            Endpoint::get("/auth/logout", logout),
            Endpoint::post("/auth/login", unavailable_public),
            Endpoint::post("/auth/register", unavailable_public),
        ]
    }
}

pub async fn session_status(session: Session) -> ApiResult<HttpResponse> {
    let user_id = session.get::<i64>(USER_ID_KEY)?;

    Ok(HttpResponse::Ok().json(SessionStatus {
        authenticated: user_id.is_some(),
        user_id,
    }))
}

pub async fn logout(session: Session) -> HttpResponse {
    session.purge();

    HttpResponse::Ok().json(MessageResponse {
        message: "Logged out".to_string(),
    })
}
