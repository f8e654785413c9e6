use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::ExtraData;
use crate::dto::FacilityDto;
use crate::entities::{
    facility, facility_type, geographic_zone, requisition_group_member,
    requisition_group_program_schedule, supervisory_node, user,
};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::{
    DbFacilityRepository, DbFacilityTypeRepository, FacilityRepository, FacilitySearchQuery,
    FacilityTypeRepository,
};

use super::geographic_zones::GeographicZoneService;
use super::{delete_existing, ensure_unique, ensure_unreferenced, exists, require_reference};

/// Facility filters shared by the query-string listing and the search body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FacilitySearchParams {
    #[serde(default, rename = "id")]
    #[schema(value_type = Vec<Uuid>)]
    pub ids: HashSet<Uuid>,
    pub code: Option<String>,
    pub name: Option<String>,
    /// Exact facility type code
    #[serde(rename = "type")]
    pub facility_type_code: Option<String>,
    pub zone_id: Option<Uuid>,
    /// Include facilities of every zone below `zoneId`
    #[serde(default)]
    pub recurse: bool,
    #[serde(default)]
    pub extra_data: ExtraData,
}

impl FacilitySearchParams {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && !self.recurse && !self.has_filters()
    }

    fn has_only_ids(&self) -> bool {
        !self.ids.is_empty() && !self.has_filters()
    }

    fn has_filters(&self) -> bool {
        self.code.is_some()
            || self.name.is_some()
            || self.facility_type_code.is_some()
            || self.zone_id.is_some()
            || !self.extra_data.is_empty()
    }
}

#[derive(Clone)]
pub struct FacilityService {
    db: Arc<DatabaseConnection>,
    facilities: Arc<dyn FacilityRepository>,
    facility_types: Arc<dyn FacilityTypeRepository>,
    zones: Arc<GeographicZoneService>,
}

impl FacilityService {
    pub fn new(db: Arc<DatabaseConnection>, zones: Arc<GeographicZoneService>) -> Self {
        let facilities = Arc::new(DbFacilityRepository::new(db.clone()));
        let facility_types = Arc::new(DbFacilityTypeRepository::new(db.clone()));
        Self::with_repositories(db, facilities, facility_types, zones)
    }

    pub fn with_repositories(
        db: Arc<DatabaseConnection>,
        facilities: Arc<dyn FacilityRepository>,
        facility_types: Arc<dyn FacilityTypeRepository>,
        zones: Arc<GeographicZoneService>,
    ) -> Self {
        Self {
            db,
            facilities,
            facility_types,
            zones,
        }
    }

    /// Listing behind `GET /facilities`: everything, a direct id lookup,
    /// or a full search depending on which parameters are present.
    #[instrument(skip(self))]
    pub async fn get_facilities(
        &self,
        params: FacilitySearchParams,
    ) -> Result<Vec<facility::Model>, ServiceError> {
        if params.is_empty() {
            return self.facilities.find_all().await;
        }
        if params.has_only_ids() {
            return self.facilities.find_all_by_ids(params.ids).await;
        }
        self.search_facilities(params).await
    }

    /// Multi-criteria search. Zone and facility type references must resolve.
    #[instrument(skip(self))]
    pub async fn search_facilities(
        &self,
        params: FacilitySearchParams,
    ) -> Result<Vec<facility::Model>, ServiceError> {
        if params.ids.is_empty() && !params.has_filters() {
            return self.facilities.find_all().await;
        }

        let FacilitySearchParams {
            ids,
            code,
            name,
            facility_type_code,
            zone_id,
            recurse,
            extra_data,
        } = params;

        if let Some(zone_id) = zone_id {
            if self.zones.find_zone(zone_id).await?.is_none() {
                return Err(ServiceError::validation(
                    messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND,
                    zone_id,
                ));
            }
        }
        if let Some(type_code) = &facility_type_code {
            if self
                .facility_types
                .find_by_code(type_code.clone())
                .await?
                .is_none()
            {
                return Err(ServiceError::validation(
                    messages::ERROR_FACILITY_TYPE_NOT_FOUND,
                    type_code,
                ));
            }
        }

        let zone_ids = match zone_id {
            Some(zone_id) if recurse => {
                let mut zone_ids = self.zones.get_all_zones_in_hierarchy(zone_id).await?;
                zone_ids.insert(zone_id);
                debug!(zone_count = zone_ids.len(), "Searching facilities in zone subtree");
                Some(zone_ids)
            }
            Some(zone_id) => Some(HashSet::from([zone_id])),
            None => None,
        };

        let query = FacilitySearchQuery {
            ids: if ids.is_empty() { None } else { Some(ids) },
            code,
            name,
            zone_ids,
            facility_type_code,
            extra_data,
        };
        self.facilities.search(query).await
    }

    #[instrument(skip(self))]
    pub async fn get_facility(&self, id: Uuid) -> Result<facility::Model, ServiceError> {
        self.facilities
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(messages::ERROR_FACILITY_NOT_FOUND, id))
    }

    #[instrument(skip(self, dto))]
    pub async fn create_facility(&self, dto: FacilityDto) -> Result<facility::Model, ServiceError> {
        let facility = self.write_facility(Uuid::new_v4(), dto, false).await?;
        info!(facility_id = %facility.id, code = %facility.code, "Facility created");
        Ok(facility)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_facility(
        &self,
        id: Uuid,
        dto: FacilityDto,
    ) -> Result<facility::Model, ServiceError> {
        let existing = exists::<facility::Entity>(&self.db, id).await?;
        let facility = self.write_facility(id, dto, existing).await?;
        info!(facility_id = %id, created = !existing, "Facility saved");
        Ok(facility)
    }

    #[instrument(skip(self))]
    pub async fn delete_facility(&self, id: Uuid) -> Result<(), ServiceError> {
        let key = messages::ERROR_FACILITY_IN_USE;
        ensure_unreferenced::<user::Entity>(&self.db, user::Column::HomeFacilityId, id, key)
            .await?;
        ensure_unreferenced::<requisition_group_member::Entity>(
            &self.db,
            requisition_group_member::Column::FacilityId,
            id,
            key,
        )
        .await?;
        ensure_unreferenced::<supervisory_node::Entity>(
            &self.db,
            supervisory_node::Column::FacilityId,
            id,
            key,
        )
        .await?;
        ensure_unreferenced::<requisition_group_program_schedule::Entity>(
            &self.db,
            requisition_group_program_schedule::Column::DropOffFacilityId,
            id,
            key,
        )
        .await?;
        delete_existing::<facility::Entity>(&self.db, id, messages::ERROR_FACILITY_NOT_FOUND)
            .await?;
        info!(facility_id = %id, "Facility deleted");
        Ok(())
    }

    async fn write_facility(
        &self,
        id: Uuid,
        dto: FacilityDto,
        existing: bool,
    ) -> Result<facility::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<facility::Entity>(
            &self.db,
            facility::Column::Code,
            dto.code.as_str(),
            facility::Column::Id,
            id,
            messages::ERROR_FACILITY_CODE_DUPLICATED,
        )
        .await?;
        require_reference::<geographic_zone::Entity>(
            &self.db,
            dto.geographic_zone_id,
            messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND,
        )
        .await?;
        require_reference::<facility_type::Entity>(
            &self.db,
            dto.type_id,
            messages::ERROR_FACILITY_TYPE_NOT_FOUND,
        )
        .await?;

        let active = dto.into_active_model(id);
        let facility = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(facility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::facility_repository::{
        MockFacilityRepository, MockFacilityTypeRepository,
    };
    use crate::repositories::geographic_zone_repository::{
        MockGeographicLevelRepository, MockGeographicZoneRepository,
    };
    use assert_matches::assert_matches;
    use mockall::predicate::eq;

    fn facility_in(zone_id: Uuid, code: &str) -> facility::Model {
        facility::Model {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: None,
            description: None,
            geographic_zone_id: zone_id,
            type_id: Uuid::new_v4(),
            active: true,
            enabled: true,
            go_live_date: None,
            go_down_date: None,
            comment: None,
            extra_data: None,
        }
    }

    fn zone(id: Uuid) -> geographic_zone::Model {
        geographic_zone::Model {
            id,
            code: "Z".into(),
            name: None,
            level_id: Uuid::new_v4(),
            parent_id: None,
            catchment_population: None,
            latitude: None,
            longitude: None,
        }
    }

    struct Mocks {
        facilities: MockFacilityRepository,
        facility_types: MockFacilityTypeRepository,
        zones: MockGeographicZoneRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                facilities: MockFacilityRepository::new(),
                facility_types: MockFacilityTypeRepository::new(),
                zones: MockGeographicZoneRepository::new(),
            }
        }

        fn into_service(self) -> FacilityService {
            let db = Arc::new(DatabaseConnection::Disconnected);
            let zones = Arc::new(GeographicZoneService::with_repositories(
                db.clone(),
                Arc::new(self.zones),
                Arc::new(MockGeographicLevelRepository::new()),
            ));
            FacilityService::with_repositories(
                db,
                Arc::new(self.facilities),
                Arc::new(self.facility_types),
                zones,
            )
        }
    }

    #[tokio::test]
    async fn empty_params_return_full_listing() {
        let mut mocks = Mocks::new();
        let all = vec![facility_in(Uuid::new_v4(), "F1"), facility_in(Uuid::new_v4(), "F2")];
        let expected = all.clone();
        mocks
            .facilities
            .expect_find_all()
            .times(2)
            .returning(move || Ok(all.clone()));
        mocks.facilities.expect_search().never();
        let service = mocks.into_service();

        let listed = service
            .get_facilities(FacilitySearchParams::default())
            .await
            .unwrap();
        let searched = service
            .search_facilities(FacilitySearchParams::default())
            .await
            .unwrap();

        assert_eq!(listed, expected);
        assert_eq!(searched, expected);
    }

    #[tokio::test]
    async fn ids_only_use_direct_lookup() {
        let ids = HashSet::from([Uuid::new_v4(), Uuid::new_v4()]);
        let mut mocks = Mocks::new();
        mocks
            .facilities
            .expect_find_all_by_ids()
            .with(eq(ids.clone()))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        mocks.facilities.expect_search().never();

        let params = FacilitySearchParams {
            ids,
            ..Default::default()
        };
        mocks.into_service().get_facilities(params).await.unwrap();
    }

    #[tokio::test]
    async fn recurse_expands_zone_subtree() {
        let zone_id = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .zones
            .expect_find_by_id()
            .with(eq(zone_id))
            .returning(move |id| Ok(Some(zone(id))));
        mocks
            .zones
            .expect_find_ids_by_parent()
            .with(eq(zone_id))
            .returning(move |_| Ok(HashSet::from([child])));
        mocks
            .zones
            .expect_find_ids_by_parent()
            .with(eq(child))
            .returning(move |_| Ok(HashSet::from([grandchild])));
        mocks
            .zones
            .expect_find_ids_by_parent()
            .with(eq(grandchild))
            .returning(|_| Ok(HashSet::new()));
        mocks
            .facilities
            .expect_search()
            .with(eq(FacilitySearchQuery {
                name: Some("clinic".into()),
                zone_ids: Some(HashSet::from([zone_id, child, grandchild])),
                ..Default::default()
            }))
            .times(1)
            .returning(move |_| Ok(vec![facility_in(grandchild, "F-deep")]));

        let params = FacilitySearchParams {
            name: Some("clinic".into()),
            zone_id: Some(zone_id),
            recurse: true,
            ..Default::default()
        };
        let found = mocks.into_service().get_facilities(params).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].geographic_zone_id, grandchild);
    }

    #[tokio::test]
    async fn without_recurse_only_the_given_zone_is_searched() {
        let zone_id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .zones
            .expect_find_by_id()
            .returning(move |id| Ok(Some(zone(id))));
        mocks.zones.expect_find_ids_by_parent().never();
        mocks
            .facilities
            .expect_search()
            .with(eq(FacilitySearchQuery {
                zone_ids: Some(HashSet::from([zone_id])),
                ..Default::default()
            }))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let params = FacilitySearchParams {
            zone_id: Some(zone_id),
            ..Default::default()
        };
        mocks.into_service().search_facilities(params).await.unwrap();
    }

    #[tokio::test]
    async fn recurse_without_zone_lists_everything() {
        let mut mocks = Mocks::new();
        mocks
            .facilities
            .expect_find_all()
            .times(1)
            .returning(|| Ok(Vec::new()));
        mocks.facilities.expect_search().never();

        let params = FacilitySearchParams {
            recurse: true,
            ..Default::default()
        };
        mocks.into_service().search_facilities(params).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_zone_is_a_validation_error() {
        let zone_id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks.zones.expect_find_by_id().returning(|_| Ok(None));
        mocks.facilities.expect_search().never();

        let params = FacilitySearchParams {
            zone_id: Some(zone_id),
            ..Default::default()
        };
        let err = mocks
            .into_service()
            .search_facilities(params)
            .await
            .unwrap_err();

        assert_matches!(err, ServiceError::ValidationError(msg) => {
            assert_eq!(msg.key, messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND);
        });
    }

    #[tokio::test]
    async fn unknown_facility_type_is_a_validation_error() {
        let mut mocks = Mocks::new();
        mocks
            .facility_types
            .expect_find_by_code()
            .with(eq("hospital".to_string()))
            .returning(|_| Ok(None));
        mocks.facilities.expect_search().never();

        let params = FacilitySearchParams {
            facility_type_code: Some("hospital".into()),
            ..Default::default()
        };
        let err = mocks
            .into_service()
            .search_facilities(params)
            .await
            .unwrap_err();

        assert_matches!(err, ServiceError::ValidationError(msg) => {
            assert_eq!(msg.key, messages::ERROR_FACILITY_TYPE_NOT_FOUND);
            assert_eq!(msg.params, vec!["hospital".to_string()]);
        });
    }

    #[tokio::test]
    async fn extra_data_and_type_pass_through() {
        let mut extra = ExtraData::new();
        extra.insert("region".into(), "north".into());
        let mut mocks = Mocks::new();
        mocks.facility_types.expect_find_by_code().returning(|code| {
            Ok(Some(facility_type::Model {
                id: Uuid::new_v4(),
                code,
                name: None,
                description: None,
                display_order: None,
                active: true,
            }))
        });
        mocks
            .facilities
            .expect_search()
            .with(eq(FacilitySearchQuery {
                facility_type_code: Some("clinic".into()),
                extra_data: extra.clone(),
                ..Default::default()
            }))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let params = FacilitySearchParams {
            facility_type_code: Some("clinic".into()),
            extra_data: extra,
            ..Default::default()
        };
        mocks.into_service().search_facilities(params).await.unwrap();
    }

    #[test]
    fn search_body_uses_wire_names() {
        let zone_id = Uuid::new_v4();
        let params: FacilitySearchParams = serde_json::from_value(serde_json::json!({
            "type": "clinic",
            "zoneId": zone_id,
            "recurse": true,
            "extraData": {"region": "north"}
        }))
        .unwrap();

        assert_eq!(params.facility_type_code.as_deref(), Some("clinic"));
        assert_eq!(params.zone_id, Some(zone_id));
        assert!(params.recurse);
        assert_eq!(params.extra_data.get("region").map(String::as_str), Some("north"));
    }
}
