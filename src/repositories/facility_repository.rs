use async_trait::async_trait;
use sea_orm::{
    sea_query::Query, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::common::{contains_extra_data, ExtraData};
use crate::entities::{facility, facility_type};
use crate::errors::ServiceError;

use super::{contains_ignore_case, BaseRepository, Repository};

/// Resolved facility filters; all given criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilitySearchQuery {
    pub ids: Option<HashSet<Uuid>>,
    pub code: Option<String>,
    pub name: Option<String>,
    /// Facilities located in any of these zones
    pub zone_ids: Option<HashSet<Uuid>>,
    pub facility_type_code: Option<String>,
    /// Key/value pairs the facility's extra data must contain
    pub extra_data: ExtraData,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<facility::Model>, ServiceError>;

    async fn find_all(&self) -> Result<Vec<facility::Model>, ServiceError>;

    async fn find_all_by_ids(
        &self,
        ids: HashSet<Uuid>,
    ) -> Result<Vec<facility::Model>, ServiceError>;

    async fn search(&self, query: FacilitySearchQuery)
        -> Result<Vec<facility::Model>, ServiceError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FacilityTypeRepository: Send + Sync {
    async fn find_by_code(&self, code: String)
        -> Result<Option<facility_type::Model>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct DbFacilityRepository {
    base: BaseRepository,
}

impl DbFacilityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl FacilityRepository for DbFacilityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<facility::Model>, ServiceError> {
        Ok(facility::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<facility::Model>, ServiceError> {
        Ok(facility::Entity::find()
            .order_by_asc(facility::Column::Code)
            .all(self.base.get_db())
            .await?)
    }

    async fn find_all_by_ids(
        &self,
        ids: HashSet<Uuid>,
    ) -> Result<Vec<facility::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(facility::Entity::find()
            .filter(facility::Column::Id.is_in(ids))
            .order_by_asc(facility::Column::Code)
            .all(self.base.get_db())
            .await?)
    }

    async fn search(
        &self,
        query: FacilitySearchQuery,
    ) -> Result<Vec<facility::Model>, ServiceError> {
        let backend = self.base.get_db().get_database_backend();
        let mut select = facility::Entity::find();

        if let Some(ids) = query.ids {
            select = select.filter(facility::Column::Id.is_in(ids));
        }
        if let Some(code) = &query.code {
            select = select.filter(contains_ignore_case(backend, facility::Column::Code, code));
        }
        if let Some(name) = &query.name {
            select = select.filter(contains_ignore_case(backend, facility::Column::Name, name));
        }
        if let Some(zone_ids) = query.zone_ids {
            select = select.filter(facility::Column::GeographicZoneId.is_in(zone_ids));
        }
        if let Some(type_code) = query.facility_type_code {
            select = select.filter(
                facility::Column::TypeId.in_subquery(
                    Query::select()
                        .column(facility_type::Column::Id)
                        .from(facility_type::Entity)
                        .and_where(facility_type::Column::Code.eq(type_code))
                        .to_owned(),
                ),
            );
        }

        let facilities = select
            .order_by_asc(facility::Column::Code)
            .all(self.base.get_db())
            .await?;

        // Extra data containment is checked in memory.
        Ok(facilities
            .into_iter()
            .filter(|f| contains_extra_data(f.extra_data.as_ref(), &query.extra_data))
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct DbFacilityTypeRepository {
    base: BaseRepository,
}

impl DbFacilityTypeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl FacilityTypeRepository for DbFacilityTypeRepository {
    async fn find_by_code(
        &self,
        code: String,
    ) -> Result<Option<facility_type::Model>, ServiceError> {
        Ok(facility_type::Entity::find()
            .filter(facility_type::Column::Code.eq(code))
            .one(self.base.get_db())
            .await?)
    }
}
