//! Identity of the caller as recorded in the session.

use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::Serialize;

use crate::errors::ApiError;
use crate::session::USER_ID_KEY;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// A caller with a signed-in session. Extracting it from a request without
/// one fails with [`ApiError::Unauthorized`].
pub struct SessionUser {
    pub user_id: i64,
}

impl SessionUser {
    pub fn from_session(session: &Session) -> Result<Self, ApiError> {
        match session.get::<i64>(USER_ID_KEY)? {
            Some(user_id) => Ok(Self { user_id }),
            None => Err(ApiError::Unauthorized),
        }
    }
}

impl FromRequest for SessionUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_session(&req.get_session()))
    }
}
