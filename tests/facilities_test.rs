mod common;

use axum::http::StatusCode;
use common::{ids_in, message_key, TestApp};
use referencedata_api::messages;
use serde_json::json;
use uuid::Uuid;

struct Seeded {
    country: Uuid,
    north: Uuid,
    district: Uuid,
    clinic: Uuid,
    national: Uuid,
    regional: Uuid,
    district_clinic: Uuid,
}

/// Country MW > region MW-N > district MW-N-01, one facility in each zone.
async fn seed(app: &TestApp) -> Seeded {
    let country_level = app.create_level("COUNTRY", 1).await;
    let region_level = app.create_level("REGION", 2).await;
    let district_level = app.create_level("DISTRICT", 3).await;
    let country = app.create_zone("MW", country_level, None).await;
    let north = app.create_zone("MW-N", region_level, Some(country)).await;
    let district = app.create_zone("MW-N-01", district_level, Some(north)).await;

    let clinic = app.create_facility_type("health_center").await;
    let hospital = app.create_facility_type("district_hospital").await;

    let national = app.create_facility("HOSP-NAT", country, hospital).await;
    let regional = app.create_facility("HOSP-N", north, hospital).await;
    let district_clinic = app.create_facility("HC-N-01", district, clinic).await;

    Seeded {
        country,
        north,
        district,
        clinic,
        national,
        regional,
        district_clinic,
    }
}

fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

#[tokio::test]
async fn listing_without_parameters_returns_every_facility() {
    let app = TestApp::new().await;
    seed(&app).await;

    let (status, page) = app.get("/api/facilities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 3);
    // Ordered by code
    assert_eq!(page["content"][0]["code"], "HC-N-01");
}

#[tokio::test]
async fn listing_by_repeated_ids() {
    let app = TestApp::new().await;
    let s = seed(&app).await;

    let (status, page) = app
        .get(&format!(
            "/api/facilities?id={}&id={}",
            s.national, s.district_clinic
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sorted(ids_in(&page)),
        sorted(vec![s.national, s.district_clinic])
    );
}

#[tokio::test]
async fn listing_rejects_unknown_parameters() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/facilities?colour=red").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_SEARCH_PARAMS_INVALID);

    let (status, body) = app.get("/api/facilities?id=not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_INVALID_UUID);
}

#[tokio::test]
async fn zone_search_without_recurse_matches_that_zone_only() {
    let app = TestApp::new().await;
    let s = seed(&app).await;

    let (_, page) = app
        .get(&format!("/api/facilities?zoneId={}", s.north))
        .await;
    assert_eq!(ids_in(&page), vec![s.regional]);
}

#[tokio::test]
async fn recursive_zone_search_covers_the_subtree() {
    let app = TestApp::new().await;
    let s = seed(&app).await;

    let (status, page) = app
        .post(
            "/api/facilities/search",
            json!({ "zoneId": s.north, "recurse": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sorted(ids_in(&page)),
        sorted(vec![s.regional, s.district_clinic])
    );

    let (_, page) = app
        .get(&format!("/api/facilities?zoneId={}&recurse=true", s.country))
        .await;
    assert_eq!(page["totalElements"], 3);
}

#[tokio::test]
async fn search_combines_criteria() {
    let app = TestApp::new().await;
    let s = seed(&app).await;

    let (_, page) = app
        .post(
            "/api/facilities/search",
            json!({ "zoneId": s.country, "recurse": true, "type": "district_hospital", "code": "hosp" }),
        )
        .await;
    assert_eq!(
        sorted(ids_in(&page)),
        sorted(vec![s.national, s.regional])
    );

    let (_, page) = app
        .post(
            "/api/facilities/search",
            json!({ "id": [s.national, s.district_clinic], "name": "hc" }),
        )
        .await;
    assert_eq!(ids_in(&page), vec![s.district_clinic]);
}

#[tokio::test]
async fn search_with_unknown_zone_or_type_is_rejected() {
    let app = TestApp::new().await;
    seed(&app).await;

    let (status, body) = app
        .post("/api/facilities/search", json!({ "zoneId": Uuid::new_v4() }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND);

    let (status, body) = app
        .post("/api/facilities/search", json!({ "type": "warehouse" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_TYPE_NOT_FOUND);
}

#[tokio::test]
async fn search_by_extra_data() {
    let app = TestApp::new().await;
    let s = seed(&app).await;

    let (status, _) = app
        .post(
            "/api/facilities",
            json!({
                "code": "HC-N-02",
                "name": "Lakeside",
                "geographicZoneId": s.district,
                "typeId": s.clinic,
                "extraData": { "operator": "moh", "ownership": "public" },
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, page) = app
        .post(
            "/api/facilities/search",
            json!({ "extraData": { "operator": "moh" } }),
        )
        .await;
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["code"], "HC-N-02");
    assert_eq!(page["content"][0]["extraData"]["ownership"], "public");

    let (_, page) = app
        .post(
            "/api/facilities/search",
            json!({ "extraData": { "operator": "ngo" } }),
        )
        .await;
    assert_eq!(page["totalElements"], 0);
}

#[tokio::test]
async fn facility_writes_validate_references_and_codes() {
    let app = TestApp::new().await;
    let s = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/facilities",
            json!({ "code": "HOSP-N", "geographicZoneId": s.north, "typeId": s.clinic }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_CODE_DUPLICATED);

    let (status, body) = app
        .post(
            "/api/facilities",
            json!({ "code": "HC-X", "geographicZoneId": Uuid::new_v4(), "typeId": s.clinic }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND);

    let (status, body) = app
        .post(
            "/api/facilities",
            json!({ "code": "HC-X", "geographicZoneId": s.north, "typeId": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_TYPE_NOT_FOUND);
}

#[tokio::test]
async fn facility_lifecycle() {
    let app = TestApp::new().await;
    let s = seed(&app).await;
    let uri = format!("/api/facilities/{}", s.regional);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);
    assert_eq!(body["enabled"], true);

    let (status, body) = app
        .put(
            &uri,
            json!({
                "code": "HOSP-N",
                "name": "Northern Regional Hospital",
                "geographicZoneId": s.north,
                "typeId": s.clinic,
                "active": false,
                "goLiveDate": "2020-01-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);
    assert_eq!(body["goLiveDate"], "2020-01-01");

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_NOT_FOUND);
}

#[tokio::test]
async fn code_and_name_fragments_match_wildcards_literally() {
    let app = TestApp::new().await;
    let level = app.create_level("COUNTRY", 1).await;
    let zone = app.create_zone("MW", level, None).await;
    let facility_type = app.create_facility_type("health_center").await;
    let underscored = app.create_facility("HC_01", zone, facility_type).await;
    app.create_facility("HCX01", zone, facility_type).await;
    let percent = app.create_facility("HC%02", zone, facility_type).await;

    let (status, page) = app.get("/api/facilities?code=c_0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_in(&page), vec![underscored]);

    let (_, page) = app.get("/api/facilities?code=%25").await;
    assert_eq!(ids_in(&page), vec![percent]);

    let (_, page) = app
        .post("/api/facilities/search", json!({ "name": "hc_" }))
        .await;
    assert_eq!(ids_in(&page), vec![underscored]);
}

#[tokio::test]
async fn facility_types_filter_by_ids_and_active_flag() {
    let app = TestApp::new().await;
    let clinic = app.create_facility_type("health_center").await;
    let hospital = app.create_facility_type("district_hospital").await;
    let retired = app
        .create(
            "/api/facilityTypes",
            json!({ "code": "dispensary", "name": "Dispensary", "active": false }),
        )
        .await;

    let (status, page) = app.get("/api/facilityTypes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 3);

    let (_, page) = app
        .get(&format!("/api/facilityTypes?id={clinic}&id={retired}"))
        .await;
    assert_eq!(sorted(ids_in(&page)), sorted(vec![clinic, retired]));

    let (_, page) = app.get("/api/facilityTypes?active=false").await;
    assert_eq!(ids_in(&page), vec![retired]);

    let (_, page) = app
        .get(&format!("/api/facilityTypes?id={clinic}&id={retired}&active=true"))
        .await;
    assert_eq!(ids_in(&page), vec![clinic]);

    let (_, page) = app
        .get(&format!("/api/facilityTypes?id={hospital}&active=false"))
        .await;
    assert_eq!(page["totalElements"], 0);

    let (status, body) = app.get("/api/facilityTypes?active=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_SEARCH_PARAMS_INVALID);
}
