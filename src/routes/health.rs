//! Liveness endpoints, served at `/health` and `/api/health`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::db::ConnectionProbe;
use crate::dto::health::HealthReport;
use crate::errors::ApiResult;

/// Opens and closes a fresh database connection on every call.
pub async fn health(database: web::Data<dyn ConnectionProbe>) -> ApiResult<HttpResponse> {
    let database = database.into_inner();

    let report = match web::block(move || database.probe()).await? {
        Ok(()) => HealthReport::connected(),
        Err(err) => HealthReport::failed(err.to_string()),
    };

    let status = if report.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(HttpResponse::build(status).json(report))
}
