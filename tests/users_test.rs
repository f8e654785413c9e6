mod common;

use axum::http::StatusCode;
use common::{ids_in, message_key, TestApp};
use referencedata_api::messages;
use serde_json::{json, Value};
use uuid::Uuid;

fn user(username: &str, first_name: &str, email: &str) -> Value {
    json!({
        "username": username,
        "firstName": first_name,
        "lastName": "Banda",
        "email": email,
    })
}

async fn home_facility(app: &TestApp) -> Uuid {
    let level = app.create_level("COUNTRY", 1).await;
    let zone = app.create_zone("MW", level, None).await;
    let facility_type = app.create_facility_type("health_center").await;
    app.create_facility("HC01", zone, facility_type).await
}

#[tokio::test]
async fn user_defaults_on_create() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/users", user("administrator", "Admin", "admin@example.org"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["active"], true);
    assert_eq!(body["verified"], false);
    assert_eq!(body["loginRestricted"], false);
}

#[tokio::test]
async fn search_filters_on_every_given_field() {
    let app = TestApp::new().await;
    let facility = home_facility(&app).await;

    let mut chisomo = user("chisomo", "Chisomo", "chisomo@example.org");
    chisomo["homeFacilityId"] = json!(facility);
    chisomo["extraData"] = json!({ "role": "storeroom" });
    let chisomo = app.create("/api/users", chisomo).await;

    let mut kondwani = user("kondwani", "Kondwani", "kondwani@example.org");
    kondwani["active"] = json!(false);
    let kondwani = app.create("/api/users", kondwani).await;

    let (status, page) = app.post("/api/users/search", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_in(&page), vec![chisomo, kondwani]);

    let (_, page) = app
        .post("/api/users/search", json!({ "homeFacilityId": facility }))
        .await;
    assert_eq!(ids_in(&page), vec![chisomo]);

    let (_, page) = app
        .post("/api/users/search", json!({ "active": false }))
        .await;
    assert_eq!(ids_in(&page), vec![kondwani]);

    let (_, page) = app
        .post(
            "/api/users/search",
            json!({ "lastName": "Banda", "extraData": { "role": "storeroom" } }),
        )
        .await;
    assert_eq!(ids_in(&page), vec![chisomo]);

    let (_, page) = app
        .post("/api/users/search", json!({ "id": [kondwani.to_string()] }))
        .await;
    assert_eq!(ids_in(&page), vec![kondwani]);
}

#[tokio::test]
async fn search_rejects_malformed_ids() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/users/search", json!({ "homeFacilityId": "HC01" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_INVALID_UUID);
    assert_eq!(body["params"], json!(["HC01"]));
}

#[tokio::test]
async fn required_fields_and_email_format_are_validated() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/users", user("", "Admin", "admin@example.org"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_USER_FIELD_REQUIRED);
    assert_eq!(body["params"], json!(["username"]));

    let (status, body) = app
        .post("/api/users", user("administrator", "Admin", "not-an-email"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_USER_EMAIL_INVALID);
}

#[tokio::test]
async fn usernames_and_emails_are_unique() {
    let app = TestApp::new().await;
    app.create("/api/users", user("administrator", "Admin", "admin@example.org"))
        .await;

    let (status, body) = app
        .post("/api/users", user("administrator", "Other", "other@example.org"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_USER_USERNAME_DUPLICATED);

    let (status, body) = app
        .post("/api/users", user("other", "Other", "admin@example.org"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_USER_EMAIL_DUPLICATED);
}

#[tokio::test]
async fn unknown_home_facility_is_rejected() {
    let app = TestApp::new().await;
    let mut body = user("administrator", "Admin", "admin@example.org");
    body["homeFacilityId"] = json!(Uuid::new_v4());

    let (status, body) = app.post("/api/users", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_NOT_FOUND);
}

#[tokio::test]
async fn user_lifecycle() {
    let app = TestApp::new().await;
    let id = app
        .create("/api/users", user("administrator", "Admin", "admin@example.org"))
        .await;
    let uri = format!("/api/users/{id}");

    let mut updated = user("administrator", "Administrator", "admin@example.org");
    updated["timezone"] = json!("Africa/Blantyre");
    let (status, body) = app.put(&uri, updated).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Administrator");
    assert_eq!(body["timezone"], "Africa/Blantyre");

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message_key(&body), messages::ERROR_USER_NOT_FOUND);
}
