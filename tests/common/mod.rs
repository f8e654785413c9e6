#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use referencedata_api::{build_router, config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Helper harness for spinning up the full router backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with a fresh, migrated database.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // One connection keeps every query on the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.api_default_page_size = 20;
        cfg.api_max_page_size = 100;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Runs a prepared request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router call failed")
    }

    /// Send a request and return the status with the decoded JSON body (`Null` when empty).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize request body"))
            }
            None => Body::empty(),
        };

        let response = self
            .send(builder.body(body).expect("failed to build request"))
            .await;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// POSTs `body` and returns the id of the created resource.
    pub async fn create(&self, uri: &str, body: Value) -> Uuid {
        let (status, created) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "creating via {uri}: {created}");
        id_of(&created)
    }

    pub async fn create_level(&self, code: &str, level_number: i32) -> Uuid {
        self.create(
            "/api/geographicLevels",
            json!({ "code": code, "name": code, "levelNumber": level_number }),
        )
        .await
    }

    pub async fn create_zone(&self, code: &str, level_id: Uuid, parent_id: Option<Uuid>) -> Uuid {
        self.create(
            "/api/geographicZones",
            json!({ "code": code, "name": code, "levelId": level_id, "parentId": parent_id }),
        )
        .await
    }

    pub async fn create_facility_type(&self, code: &str) -> Uuid {
        self.create("/api/facilityTypes", json!({ "code": code, "name": code }))
            .await
    }

    pub async fn create_facility(&self, code: &str, zone_id: Uuid, type_id: Uuid) -> Uuid {
        self.create(
            "/api/facilities",
            json!({
                "code": code,
                "name": code,
                "geographicZoneId": zone_id,
                "typeId": type_id,
            }),
        )
        .await
    }

    pub async fn create_program(&self, code: &str) -> Uuid {
        self.create("/api/programs", json!({ "code": code, "name": code }))
            .await
    }

    pub async fn create_schedule(&self, code: &str) -> Uuid {
        self.create(
            "/api/processingSchedules",
            json!({ "code": code, "name": format!("{code} schedule") }),
        )
        .await
    }

    pub async fn create_node(&self, code: &str, parent_id: Option<Uuid>) -> Uuid {
        self.create(
            "/api/supervisoryNodes",
            json!({ "code": code, "name": code, "parentNodeId": parent_id }),
        )
        .await
    }

    pub async fn create_group(&self, code: &str, node_id: Uuid, members: &[Uuid]) -> Uuid {
        self.create(
            "/api/requisitionGroups",
            json!({
                "code": code,
                "name": code,
                "supervisoryNodeId": node_id,
                "memberFacilityIds": members,
            }),
        )
        .await
    }

    pub async fn link_schedule(&self, group_id: Uuid, program_id: Uuid, schedule_id: Uuid) -> Uuid {
        self.create(
            "/api/requisitionGroupProgramSchedules",
            json!({
                "requisitionGroupId": group_id,
                "programId": program_id,
                "processingScheduleId": schedule_id,
            }),
        )
        .await
    }
}

/// Reads the `id` field of a returned resource.
pub fn id_of(value: &Value) -> Uuid {
    value["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(|| panic!("no id in {value}"))
}

/// Ids of the items of a page or list body.
pub fn ids_in(value: &Value) -> Vec<Uuid> {
    let items = value
        .get("content")
        .unwrap_or(value)
        .as_array()
        .unwrap_or_else(|| panic!("not a list: {value}"));
    items.iter().map(id_of).collect()
}

/// The `messageKey` of an error body.
pub fn message_key(value: &Value) -> &str {
    value["messageKey"].as_str().unwrap_or_default()
}
