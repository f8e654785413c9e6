mod common;

use axum::http::StatusCode;
use common::{id_of, ids_in, message_key, TestApp};
use referencedata_api::messages;
use serde_json::json;
use uuid::Uuid;

struct Network {
    program: Uuid,
    facility: Uuid,
    other_facility: Uuid,
    schedule: Uuid,
}

async fn seed(app: &TestApp) -> Network {
    let level = app.create_level("COUNTRY", 1).await;
    let zone = app.create_zone("MW", level, None).await;
    let facility_type = app.create_facility_type("health_center").await;
    let facility = app.create_facility("HC01", zone, facility_type).await;
    let other_facility = app.create_facility("HC02", zone, facility_type).await;
    let program = app.create_program("FP").await;
    let schedule = app.create_schedule("SCH-M").await;
    Network {
        program,
        facility,
        other_facility,
        schedule,
    }
}

#[tokio::test]
async fn node_search_finds_the_supervisor_of_the_facility_group() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;
    app.link_schedule(group, n.program, n.schedule).await;

    let (status, body) = app
        .get(&format!(
            "/api/supervisoryNodes/search?programId={}&facilityId={}",
            n.program, n.facility
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_in(&body), vec![node]);
    assert_eq!(body[0]["requisitionGroupId"], group.to_string());
}

#[tokio::test]
async fn node_search_without_a_match_is_not_found() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;
    app.link_schedule(group, n.program, n.schedule).await;

    let (status, body) = app
        .get(&format!(
            "/api/supervisoryNodes/search?programId={}&facilityId={}",
            n.program, n.other_facility
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        message_key(&body),
        messages::ERROR_SUPERVISORY_NODE_NOT_FOUND_WITH_PROGRAM_AND_FACILITY
    );

    let (status, body) = app
        .get(&format!("/api/supervisoryNodes/search?programId={}", n.program))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_SEARCH_PARAMS_INVALID);
}

#[tokio::test]
async fn nodes_expose_their_children() {
    let app = TestApp::new().await;
    let root = app.create_node("SN-ROOT", None).await;
    let left = app.create_node("SN-L", Some(root)).await;
    let right = app.create_node("SN-R", Some(root)).await;

    let (status, body) = app.get(&format!("/api/supervisoryNodes/{root}")).await;
    assert_eq!(status, StatusCode::OK);
    let mut children = ids_from_strings(&body["childNodeIds"]);
    children.sort();
    let mut expected = vec![left, right];
    expected.sort();
    assert_eq!(children, expected);
}

#[tokio::test]
async fn deleting_a_node_detaches_its_children() {
    let app = TestApp::new().await;
    let root = app.create_node("SN-ROOT", None).await;
    let child = app.create_node("SN-CHILD", Some(root)).await;

    let (status, _) = app.delete(&format!("/api/supervisoryNodes/{root}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/api/supervisoryNodes/{child}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["parentNodeId"].is_null());

    let (status, body) = app.delete(&format!("/api/supervisoryNodes/{root}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message_key(&body), messages::ERROR_SUPERVISORY_NODE_NOT_FOUND);
}

#[tokio::test]
async fn reparenting_a_node_below_itself_is_rejected() {
    let app = TestApp::new().await;
    let root = app.create_node("SN-ROOT", None).await;
    let child = app.create_node("SN-CHILD", Some(root)).await;
    let grandchild = app.create_node("SN-GRAND", Some(child)).await;

    let (status, body) = app
        .put(
            &format!("/api/supervisoryNodes/{root}"),
            json!({ "code": "SN-ROOT", "parentNodeId": grandchild }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_SUPERVISORY_NODE_PARENT_CYCLE);

    let (status, body) = app
        .post(
            "/api/supervisoryNodes",
            json!({ "code": "SN-ORPHAN", "parentNodeId": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_SUPERVISORY_NODE_NOT_FOUND);
}

#[tokio::test]
async fn requisition_group_members_are_replaced_on_save() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;

    let (status, body) = app
        .put(
            &format!("/api/requisitionGroups/{group}"),
            json!({
                "code": "RG1",
                "name": "RG1",
                "supervisoryNodeId": node,
                "memberFacilityIds": [n.other_facility],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_from_strings(&body["memberFacilityIds"]), vec![n.other_facility]);

    let (status, body) = app
        .post(
            "/api/requisitionGroups",
            json!({
                "code": "RG2",
                "name": "RG2",
                "supervisoryNodeId": node,
                "memberFacilityIds": [Uuid::new_v4()],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_group_removes_its_schedule_links() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;
    let link = app.link_schedule(group, n.program, n.schedule).await;

    let (status, _) = app.delete(&format!("/api/requisitionGroups/{group}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .get(&format!("/api/requisitionGroupProgramSchedules/{link}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn schedule_links_are_unique_per_group_and_program() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;
    app.link_schedule(group, n.program, n.schedule).await;

    let (status, body) = app
        .post(
            "/api/requisitionGroupProgramSchedules",
            json!({
                "requisitionGroupId": group,
                "programId": n.program,
                "processingScheduleId": n.schedule,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        message_key(&body),
        messages::ERROR_REQUISITION_GROUP_PROGRAM_SCHEDULE_DUPLICATED
    );
}

#[tokio::test]
async fn link_search_matches_program_and_member_facility() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;
    let link = app.link_schedule(group, n.program, n.schedule).await;

    let (status, body) = app
        .get(&format!(
            "/api/requisitionGroupProgramSchedules/search?programId={}&facilityId={}",
            n.program, n.facility
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_in(&body), vec![link]);
    assert_eq!(body[0]["directDelivery"], true);

    let (_, body) = app
        .get(&format!(
            "/api/requisitionGroupProgramSchedules/search?programId={}&facilityId={}",
            n.program, n.other_facility
        ))
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn drop_off_facility_must_exist() {
    let app = TestApp::new().await;
    let n = seed(&app).await;
    let node = app.create_node("SN1", None).await;
    let group = app.create_group("RG1", node, &[n.facility]).await;

    let (status, body) = app
        .post(
            "/api/requisitionGroupProgramSchedules",
            json!({
                "requisitionGroupId": group,
                "programId": n.program,
                "processingScheduleId": n.schedule,
                "directDelivery": false,
                "dropOffFacilityId": Uuid::new_v4(),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message_key(&body), messages::ERROR_FACILITY_NOT_FOUND);

    let (status, body) = app
        .post(
            "/api/requisitionGroupProgramSchedules",
            json!({
                "requisitionGroupId": group,
                "programId": n.program,
                "processingScheduleId": n.schedule,
                "directDelivery": false,
                "dropOffFacilityId": n.other_facility,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["dropOffFacilityId"], n.other_facility.to_string());
    id_of(&body);
}

fn ids_from_strings(value: &serde_json::Value) -> Vec<Uuid> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().and_then(|s| Uuid::parse_str(s).ok()))
                .collect()
        })
        .unwrap_or_default()
}
