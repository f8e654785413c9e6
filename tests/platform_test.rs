mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{message_key, TestApp};
use referencedata_api::messages;
use serde_json::json;

#[tokio::test]
async fn liveness_reports_up() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_checks_the_database() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert_eq!(body["database"]["status"], "up");
}

#[tokio::test]
async fn request_id_is_generated_or_echoed() {
    let app = TestApp::new().await;

    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .send(
            Request::get("/health")
                .header("x-request-id", "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], "trace-42");
}

#[tokio::test]
async fn malformed_bodies_get_a_json_error() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::post("/api/programs")
                .header("content-type", "application/json")
                .body(Body::from("{\"code\": "))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );

    let (status, body) = app.post("/api/programs", json!({ "name": "no code" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_VALIDATION_FAILED);
}

#[tokio::test]
async fn malformed_path_ids_are_bad_requests() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/programs/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_INVALID_UUID);
}

#[tokio::test]
async fn missing_resources_are_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get("/api/programs/00000000-0000-0000-0000-000000000001")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message_key(&body), messages::ERROR_PROGRAM_NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn page_size_is_capped() {
    let app = TestApp::new().await;
    app.create_program("FP").await;

    let (status, page) = app.get("/api/programs?size=5000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["size"], 100);
    assert_eq!(page["totalElements"], 1);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/facilities"].is_object());
}

#[tokio::test]
async fn out_of_range_page_numbers_are_bad_requests() {
    let app = TestApp::new().await;
    app.create_program("FP").await;

    for uri in [
        "/api/facilities?page=18446744073709551615",
        "/api/geographicZones?page=18446744073709551615",
        "/api/programs?page=9223372036854775807&size=2",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(message_key(&body), messages::ERROR_SEARCH_PARAMS_INVALID);
    }

    let (status, page) = app.get("/api/programs?page=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"], json!([]));
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["last"], true);
}
