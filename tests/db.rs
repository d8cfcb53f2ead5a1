use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use fitness_tracker::db::{ConnectionProbe, PgDatabase};
use fitness_tracker::{AppContext, create_app};

mod common;

// Nothing listens on port 1, so libpq fails fast with "connection refused".
const UNREACHABLE: [(&str, &str); 5] = [
    ("DB_HOST", "127.0.0.1"),
    ("DB_PORT", "1"),
    ("DB_USER", "fitness"),
    ("DB_PASSWORD", "secret"),
    ("DB_NAME", "fitness"),
];

#[actix_web::test]
async fn unreachable_database_reports_driver_message() {
    let sessions = tempfile::tempdir().unwrap();
    let settings = common::settings_from(&UNREACHABLE, &sessions);
    let database = PgDatabase::new(&settings.database);

    let err = database.probe().unwrap_err();

    assert!(!err.to_string().is_empty());
}

#[actix_web::test]
async fn health_reports_unreachable_database() {
    let sessions = tempfile::tempdir().unwrap();
    let settings = common::settings_from(&UNREACHABLE, &sessions);
    let database = Arc::new(PgDatabase::new(&settings.database));
    let app = test::init_service(create_app(AppContext::new(settings, database))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["db"].as_str().is_some_and(|db| !db.is_empty()));
}
