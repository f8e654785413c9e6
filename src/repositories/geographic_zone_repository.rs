use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::common::{Page, PageRequest};
use crate::entities::{geographic_level, geographic_zone};
use crate::errors::ServiceError;

use super::{contains_ignore_case, fetch_page, BaseRepository, Repository};

/// Resolved zone search criteria; every `Some` field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSearchQuery {
    pub name: Option<String>,
    pub code: Option<String>,
    pub parent_id: Option<Uuid>,
    pub level_id: Option<Uuid>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeographicZoneRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<geographic_zone::Model>, ServiceError>;

    /// Ids of the zones whose parent is `parent_id`.
    async fn find_ids_by_parent(&self, parent_id: Uuid) -> Result<HashSet<Uuid>, ServiceError>;

    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<geographic_zone::Model>, ServiceError>;

    async fn search(
        &self,
        query: ZoneSearchQuery,
        page: PageRequest,
    ) -> Result<Page<geographic_zone::Model>, ServiceError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeographicLevelRepository: Send + Sync {
    async fn find_by_level_number(
        &self,
        level_number: i32,
    ) -> Result<Option<geographic_level::Model>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct DbGeographicZoneRepository {
    base: BaseRepository,
}

impl DbGeographicZoneRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl GeographicZoneRepository for DbGeographicZoneRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<geographic_zone::Model>, ServiceError> {
        Ok(geographic_zone::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await?)
    }

    async fn find_ids_by_parent(&self, parent_id: Uuid) -> Result<HashSet<Uuid>, ServiceError> {
        let ids: Vec<Uuid> = geographic_zone::Entity::find()
            .select_only()
            .column(geographic_zone::Column::Id)
            .filter(geographic_zone::Column::ParentId.eq(parent_id))
            .into_tuple()
            .all(self.base.get_db())
            .await?;
        Ok(ids.into_iter().collect())
    }

    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<geographic_zone::Model>, ServiceError> {
        let select = geographic_zone::Entity::find().order_by_asc(geographic_zone::Column::Code);
        fetch_page(self.base.get_db(), select, page).await
    }

    async fn search(
        &self,
        query: ZoneSearchQuery,
        page: PageRequest,
    ) -> Result<Page<geographic_zone::Model>, ServiceError> {
        let backend = self.base.get_db().get_database_backend();
        let mut select = geographic_zone::Entity::find();

        if let Some(name) = &query.name {
            select = select.filter(contains_ignore_case(
                backend,
                geographic_zone::Column::Name,
                name,
            ));
        }
        if let Some(code) = &query.code {
            select = select.filter(contains_ignore_case(
                backend,
                geographic_zone::Column::Code,
                code,
            ));
        }
        if let Some(parent_id) = query.parent_id {
            select = select.filter(geographic_zone::Column::ParentId.eq(parent_id));
        }
        if let Some(level_id) = query.level_id {
            select = select.filter(geographic_zone::Column::LevelId.eq(level_id));
        }

        let select = select.order_by_asc(geographic_zone::Column::Code);
        fetch_page(self.base.get_db(), select, page).await
    }
}

#[derive(Debug, Clone)]
pub struct DbGeographicLevelRepository {
    base: BaseRepository,
}

impl DbGeographicLevelRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl GeographicLevelRepository for DbGeographicLevelRepository {
    async fn find_by_level_number(
        &self,
        level_number: i32,
    ) -> Result<Option<geographic_level::Model>, ServiceError> {
        Ok(geographic_level::Entity::find()
            .filter(geographic_level::Column::LevelNumber.eq(level_number))
            .one(self.base.get_db())
            .await?)
    }
}
