use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use fitness_tracker::create_app;
use fitness_tracker::db::DbError;

mod common;

#[actix_web::test]
async fn health_endpoints_report_connected_database() {
    let (context, _sessions) = common::context(&[], common::healthy_probe());
    let app = test::init_service(create_app(context)).await;

    for path in ["/health", "/api/health"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"status": "ok", "db": "connected"}), "{path}");
    }
}

#[actix_web::test]
async fn health_endpoints_report_connection_failure() {
    let (context, _sessions) = common::context(
        &[],
        common::failing_probe("could not connect to server: Connection refused"),
    );
    let app = test::init_service(create_app(context)).await;

    for path in ["/health", "/api/health"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{path}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "status": "error",
                "db": "could not connect to server: Connection refused"
            }),
            "{path}"
        );
    }
}

#[actix_web::test]
async fn every_health_check_opens_a_new_connection() {
    let mut probe = common::MockProbe::new();
    let mut calls = 0;
    probe.expect_probe().times(3).returning(move || {
        calls += 1;
        if calls == 2 {
            Err(DbError::Connection("database is restarting".into()))
        } else {
            Ok(())
        }
    });
    let (context, _sessions) = common::context(&[], probe);
    let app = test::init_service(create_app(context)).await;

    let mut statuses = Vec::new();
    for path in ["/health", "/api/health", "/health"] {
        let req = test::TestRequest::get().uri(path).to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::OK,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::OK
        ]
    );
}
