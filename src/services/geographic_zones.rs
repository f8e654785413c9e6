use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::GeographicZoneDto;
use crate::entities::{facility, geographic_level, geographic_zone};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::{
    DbGeographicLevelRepository, DbGeographicZoneRepository, GeographicLevelRepository,
    GeographicZoneRepository, ZoneSearchQuery,
};

use super::{delete_existing, ensure_unique, ensure_unreferenced, exists, require_reference};

/// Criteria accepted by the zone search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeographicZoneSearchParams {
    pub name: Option<String>,
    pub code: Option<String>,
    /// Id of the parent zone
    pub parent: Option<Uuid>,
    pub level_number: Option<i32>,
}

impl GeographicZoneSearchParams {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.code.is_none()
            && self.parent.is_none()
            && self.level_number.is_none()
    }
}

/// Geographic zone hierarchy, search and maintenance
#[derive(Clone)]
pub struct GeographicZoneService {
    db: Arc<DatabaseConnection>,
    zones: Arc<dyn GeographicZoneRepository>,
    levels: Arc<dyn GeographicLevelRepository>,
}

impl GeographicZoneService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let zones = Arc::new(DbGeographicZoneRepository::new(db.clone()));
        let levels = Arc::new(DbGeographicLevelRepository::new(db.clone()));
        Self::with_repositories(db, zones, levels)
    }

    pub fn with_repositories(
        db: Arc<DatabaseConnection>,
        zones: Arc<dyn GeographicZoneRepository>,
        levels: Arc<dyn GeographicLevelRepository>,
    ) -> Self {
        Self { db, zones, levels }
    }

    /// Ids of every zone below `root_id`, excluding the root itself.
    ///
    /// Expands the tree one level at a time. A zone reached a second time
    /// means the stored parent links form a cycle; it is logged and skipped.
    #[instrument(skip(self))]
    pub async fn get_all_zones_in_hierarchy(
        &self,
        root_id: Uuid,
    ) -> Result<HashSet<Uuid>, ServiceError> {
        let mut descendants = HashSet::new();
        let mut frontier = vec![root_id];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for zone_id in frontier {
                for child_id in self.zones.find_ids_by_parent(zone_id).await? {
                    if child_id == root_id || !descendants.insert(child_id) {
                        warn!(%zone_id, %child_id, "Cycle in geographic zone hierarchy, skipping zone");
                        continue;
                    }
                    next.push(child_id);
                }
            }
            frontier = next;
        }

        Ok(descendants)
    }

    /// Paged zone search. Parent and level are resolved first so that
    /// unknown references fail instead of silently matching nothing.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        params: GeographicZoneSearchParams,
        page: PageRequest,
    ) -> Result<Page<geographic_zone::Model>, ServiceError> {
        if params.is_empty() {
            return self.zones.find_all(page).await;
        }

        let parent_id = match params.parent {
            Some(id) => Some(
                self.zones
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::validation(messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND, id)
                    })?
                    .id,
            ),
            None => None,
        };

        let level_id = match params.level_number {
            Some(number) => Some(
                self.levels
                    .find_by_level_number(number)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::validation(messages::ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND, number)
                    })?
                    .id,
            ),
            None => None,
        };

        let query = ZoneSearchQuery {
            name: params.name,
            code: params.code,
            parent_id,
            level_id,
        };
        self.zones.search(query, page).await
    }

    pub async fn find_zone(&self, id: Uuid) -> Result<Option<geographic_zone::Model>, ServiceError> {
        self.zones.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_zone(&self, id: Uuid) -> Result<geographic_zone::Model, ServiceError> {
        self.zones
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND, id))
    }

    #[instrument(skip(self))]
    pub async fn list_zones(
        &self,
        page: PageRequest,
    ) -> Result<Page<geographic_zone::Model>, ServiceError> {
        self.zones.find_all(page).await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_zone(
        &self,
        dto: GeographicZoneDto,
    ) -> Result<geographic_zone::Model, ServiceError> {
        let zone = self.write_zone(Uuid::new_v4(), dto, false).await?;
        info!(zone_id = %zone.id, code = %zone.code, "Geographic zone created");
        Ok(zone)
    }

    /// Replaces the zone stored under `id`, creating it when absent.
    #[instrument(skip(self, dto))]
    pub async fn save_zone(
        &self,
        id: Uuid,
        dto: GeographicZoneDto,
    ) -> Result<geographic_zone::Model, ServiceError> {
        let existing = exists::<geographic_zone::Entity>(&self.db, id).await?;
        let zone = self.write_zone(id, dto, existing).await?;
        info!(zone_id = %zone.id, created = !existing, "Geographic zone saved");
        Ok(zone)
    }

    #[instrument(skip(self))]
    pub async fn delete_zone(&self, id: Uuid) -> Result<(), ServiceError> {
        ensure_unreferenced::<geographic_zone::Entity>(
            &self.db,
            geographic_zone::Column::ParentId,
            id,
            messages::ERROR_GEOGRAPHIC_ZONE_IN_USE,
        )
        .await?;
        ensure_unreferenced::<facility::Entity>(
            &self.db,
            facility::Column::GeographicZoneId,
            id,
            messages::ERROR_GEOGRAPHIC_ZONE_IN_USE,
        )
        .await?;
        delete_existing::<geographic_zone::Entity>(
            &self.db,
            id,
            messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND,
        )
        .await?;
        info!(zone_id = %id, "Geographic zone deleted");
        Ok(())
    }

    async fn write_zone(
        &self,
        id: Uuid,
        dto: GeographicZoneDto,
        existing: bool,
    ) -> Result<geographic_zone::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<geographic_zone::Entity>(
            &self.db,
            geographic_zone::Column::Code,
            dto.code.as_str(),
            geographic_zone::Column::Id,
            id,
            messages::ERROR_GEOGRAPHIC_ZONE_CODE_DUPLICATED,
        )
        .await?;
        require_reference::<geographic_level::Entity>(
            &self.db,
            dto.level_id,
            messages::ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND,
        )
        .await?;
        if let Some(parent_id) = dto.parent_id {
            self.check_parent(id, parent_id, existing).await?;
        }

        let active = dto.into_active_model(id);
        let zone = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(zone)
    }

    /// The parent must exist and must not sit below the zone being written.
    async fn check_parent(
        &self,
        id: Uuid,
        parent_id: Uuid,
        existing: bool,
    ) -> Result<(), ServiceError> {
        if parent_id == id {
            return Err(ServiceError::validation(
                messages::ERROR_GEOGRAPHIC_ZONE_PARENT_CYCLE,
                parent_id,
            ));
        }
        if self.zones.find_by_id(parent_id).await?.is_none() {
            return Err(ServiceError::validation(
                messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND,
                parent_id,
            ));
        }
        if existing && self.get_all_zones_in_hierarchy(id).await?.contains(&parent_id) {
            return Err(ServiceError::validation(
                messages::ERROR_GEOGRAPHIC_ZONE_PARENT_CYCLE,
                parent_id,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::geographic_zone_repository::{
        MockGeographicLevelRepository, MockGeographicZoneRepository,
    };
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn zone(id: Uuid) -> geographic_zone::Model {
        geographic_zone::Model {
            id,
            code: format!("Z-{}", &id.to_string()[..8]),
            name: None,
            level_id: Uuid::new_v4(),
            parent_id: None,
            catchment_population: None,
            latitude: None,
            longitude: None,
        }
    }

    fn service(
        zones: MockGeographicZoneRepository,
        levels: MockGeographicLevelRepository,
    ) -> GeographicZoneService {
        GeographicZoneService::with_repositories(
            Arc::new(DatabaseConnection::Disconnected),
            Arc::new(zones),
            Arc::new(levels),
        )
    }

    /// Child lists held in memory, for traversal tests over generated trees.
    struct InMemoryZones {
        children: HashMap<Uuid, HashSet<Uuid>>,
    }

    #[async_trait]
    impl GeographicZoneRepository for InMemoryZones {
        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<geographic_zone::Model>, ServiceError> {
            Ok(Some(zone(id)))
        }

        async fn find_ids_by_parent(&self, parent_id: Uuid) -> Result<HashSet<Uuid>, ServiceError> {
            Ok(self.children.get(&parent_id).cloned().unwrap_or_default())
        }

        async fn find_all(
            &self,
            page: PageRequest,
        ) -> Result<Page<geographic_zone::Model>, ServiceError> {
            Ok(Page::empty(page))
        }

        async fn search(
            &self,
            _query: ZoneSearchQuery,
            page: PageRequest,
        ) -> Result<Page<geographic_zone::Model>, ServiceError> {
            Ok(Page::empty(page))
        }
    }

    fn in_memory_service(children: HashMap<Uuid, HashSet<Uuid>>) -> GeographicZoneService {
        GeographicZoneService::with_repositories(
            Arc::new(DatabaseConnection::Disconnected),
            Arc::new(InMemoryZones { children }),
            Arc::new(MockGeographicLevelRepository::new()),
        )
    }

    #[tokio::test]
    async fn hierarchy_collects_children_and_grandchildren() {
        let parent = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();

        let mut zones = MockGeographicZoneRepository::new();
        zones
            .expect_find_ids_by_parent()
            .with(eq(parent))
            .times(1)
            .returning(move |_| Ok(HashSet::from([child])));
        zones
            .expect_find_ids_by_parent()
            .with(eq(child))
            .times(1)
            .returning(move |_| Ok(HashSet::from([grandchild])));
        zones
            .expect_find_ids_by_parent()
            .with(eq(grandchild))
            .times(1)
            .returning(|_| Ok(HashSet::new()));

        let result = service(zones, MockGeographicLevelRepository::new())
            .get_all_zones_in_hierarchy(parent)
            .await
            .unwrap();

        assert_eq!(result, HashSet::from([child, grandchild]));
    }

    #[tokio::test]
    async fn hierarchy_of_leaf_is_empty() {
        let mut zones = MockGeographicZoneRepository::new();
        zones
            .expect_find_ids_by_parent()
            .times(1)
            .returning(|_| Ok(HashSet::new()));

        let result = service(zones, MockGeographicLevelRepository::new())
            .get_all_zones_in_hierarchy(Uuid::new_v4())
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn hierarchy_terminates_on_cycles() {
        let root = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        // root -> a -> b -> a, and b also points back at root
        let children = HashMap::from([
            (root, HashSet::from([a])),
            (a, HashSet::from([b])),
            (b, HashSet::from([a, root])),
        ]);

        let result = in_memory_service(children)
            .get_all_zones_in_hierarchy(root)
            .await
            .unwrap();

        assert_eq!(result, HashSet::from([a, b]));
    }

    #[tokio::test]
    async fn search_without_criteria_lists_all() {
        let mut zones = MockGeographicZoneRepository::new();
        zones
            .expect_find_all()
            .with(eq(PageRequest::new(0, 10)))
            .times(1)
            .returning(|page| Ok(Page::new(vec![zone(Uuid::new_v4())], page, 1)));
        zones.expect_search().never();

        let page = service(zones, MockGeographicLevelRepository::new())
            .search(GeographicZoneSearchParams::default(), PageRequest::new(0, 10))
            .await
            .unwrap();

        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn search_rejects_unknown_parent() {
        let parent = Uuid::new_v4();
        let mut zones = MockGeographicZoneRepository::new();
        zones.expect_find_by_id().returning(|_| Ok(None));
        zones.expect_search().never();

        let params = GeographicZoneSearchParams {
            parent: Some(parent),
            ..Default::default()
        };
        let err = service(zones, MockGeographicLevelRepository::new())
            .search(params, PageRequest::new(0, 10))
            .await
            .unwrap_err();

        assert_matches!(err, ServiceError::ValidationError(msg) => {
            assert_eq!(msg.key, messages::ERROR_GEOGRAPHIC_ZONE_NOT_FOUND);
            assert_eq!(msg.params, vec![parent.to_string()]);
        });
    }

    #[tokio::test]
    async fn search_rejects_unknown_level_number() {
        let mut zones = MockGeographicZoneRepository::new();
        zones.expect_search().never();
        let mut levels = MockGeographicLevelRepository::new();
        levels
            .expect_find_by_level_number()
            .with(eq(7))
            .returning(|_| Ok(None));

        let params = GeographicZoneSearchParams {
            level_number: Some(7),
            ..Default::default()
        };
        let err = service(zones, levels)
            .search(params, PageRequest::new(0, 10))
            .await
            .unwrap_err();

        assert_matches!(err, ServiceError::ValidationError(msg) => {
            assert_eq!(msg.key, messages::ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND);
            assert_eq!(msg.params, vec!["7".to_string()]);
        });
    }

    #[tokio::test]
    async fn search_passes_resolved_references_to_repository() {
        let parent = zone(Uuid::new_v4());
        let parent_id = parent.id;
        let level = geographic_level::Model {
            id: Uuid::new_v4(),
            code: "district".into(),
            name: None,
            level_number: 3,
        };
        let level_id = level.id;
        let page = PageRequest::new(2, 5);

        let mut zones = MockGeographicZoneRepository::new();
        zones
            .expect_find_by_id()
            .with(eq(parent_id))
            .returning(move |_| Ok(Some(parent.clone())));
        zones
            .expect_search()
            .with(
                eq(ZoneSearchQuery {
                    name: Some("lake".into()),
                    code: None,
                    parent_id: Some(parent_id),
                    level_id: Some(level_id),
                }),
                eq(page),
            )
            .times(1)
            .returning(|_, page| Ok(Page::new(Vec::new(), page, 11)));
        let mut levels = MockGeographicLevelRepository::new();
        levels
            .expect_find_by_level_number()
            .with(eq(3))
            .returning(move |_| Ok(Some(level.clone())));

        let params = GeographicZoneSearchParams {
            name: Some("lake".into()),
            parent: Some(parent_id),
            level_number: Some(3),
            ..Default::default()
        };
        let result = service(zones, levels).search(params, page).await.unwrap();

        assert_eq!(result.number, 2);
        assert_eq!(result.size, 5);
        assert_eq!(result.total_elements, 11);
    }

    #[test]
    fn search_params_reject_unknown_fields() {
        let parsed: Result<GeographicZoneSearchParams, _> =
            serde_json::from_value(serde_json::json!({"name": "x", "colour": "blue"}));
        assert!(parsed.is_err());
    }

    fn reachable(children: &HashMap<Uuid, HashSet<Uuid>>, root: Uuid) -> HashSet<Uuid> {
        let mut out = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            for child in children.get(&id).into_iter().flatten() {
                if out.insert(*child) {
                    stack.push(*child);
                }
            }
        }
        out
    }

    proptest! {
        #[test]
        fn hierarchy_matches_reachable_set(parents in prop::collection::vec(any::<prop::sample::Index>(), 0..40)) {
            // Node i + 1 hangs below some earlier node, which yields a random forest rooted at node 0.
            let ids: Vec<Uuid> = (0..=parents.len()).map(|_| Uuid::new_v4()).collect();
            let mut children: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
            for (i, parent) in parents.iter().enumerate() {
                let parent_id = ids[parent.index(i + 1)];
                children.entry(parent_id).or_default().insert(ids[i + 1]);
            }
            let expected = reachable(&children, ids[0]);

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let actual = runtime
                .block_on(in_memory_service(children).get_all_zones_in_hierarchy(ids[0]))
                .unwrap();

            prop_assert!(!actual.contains(&ids[0]));
            prop_assert_eq!(actual, expected);
        }
    }
}
