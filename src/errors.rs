//! Errors surfaced at the HTTP boundary and the handlers translating them.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers, Next};
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uniform JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not implemented")]
    NotImplemented,

    #[error("Server error")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<actix_session::SessionGetError> for ApiError {
    fn from(err: actix_session::SessionGetError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Default service: answers every request no route matched.
pub async fn not_found() -> HttpResponse {
    ApiError::NotFound.error_response()
}

/// Rewrites any 500 response into the uniform server error body.
pub fn error_handlers<B: MessageBody + 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, server_error)
}

fn server_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if let Some(err) = res.response().error() {
        log::error!("Unhandled error on {}: {err}", res.request().path());
    } else {
        log::error!("Server error on {}", res.request().path());
    }

    let (req, _) = res.into_parts();
    let response = HttpResponse::InternalServerError().json(ErrorBody::new("Server error"));
    let res = ServiceResponse::new(req, response).map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}

/// Renders errors raised by middleware (session store faults and the like)
/// instead of letting them escape the app. A 500 gets the uniform body;
/// other statuses keep the response the error renders itself.
pub async fn catch_errors<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> actix_web::Result<ServiceResponse<EitherBody<B>>> {
    let http_req = req.request().clone();

    match next.call(req).await {
        Ok(res) => Ok(res.map_into_left_body()),
        Err(err) => {
            let status = err.as_response_error().status_code();
            let response = if status == StatusCode::INTERNAL_SERVER_ERROR {
                log::error!("Request to {} failed: {err}", http_req.path());
                HttpResponse::InternalServerError().json(ErrorBody::new("Server error"))
            } else {
                err.error_response()
            };
            Ok(ServiceResponse::new(http_req, response).map_into_right_body())
        }
    }
}
