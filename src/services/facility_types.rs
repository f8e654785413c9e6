use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::FacilityTypeDto;
use crate::entities::{facility, facility_type};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::fetch_page;

use super::{delete_existing, ensure_unique, ensure_unreferenced, exists, require_found};

/// Listing filters; an empty id set and no `active` flag list every type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityTypeFilter {
    pub ids: HashSet<Uuid>,
    pub active: Option<bool>,
}

#[derive(Clone)]
pub struct FacilityTypeService {
    db: Arc<DatabaseConnection>,
}

impl FacilityTypeService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_facility_types(
        &self,
        filter: FacilityTypeFilter,
        page: PageRequest,
    ) -> Result<Page<facility_type::Model>, ServiceError> {
        let mut select = facility_type::Entity::find();
        if !filter.ids.is_empty() {
            select = select.filter(facility_type::Column::Id.is_in(filter.ids));
        }
        if let Some(active) = filter.active {
            select = select.filter(facility_type::Column::Active.eq(active));
        }
        let select = select
            .order_by_asc(facility_type::Column::DisplayOrder)
            .order_by_asc(facility_type::Column::Code);
        fetch_page(&self.db, select, page).await
    }

    #[instrument(skip(self))]
    pub async fn get_facility_type(&self, id: Uuid) -> Result<facility_type::Model, ServiceError> {
        require_found::<facility_type::Entity>(&self.db, id, messages::ERROR_FACILITY_TYPE_NOT_FOUND)
            .await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_facility_type(
        &self,
        dto: FacilityTypeDto,
    ) -> Result<facility_type::Model, ServiceError> {
        let facility_type = self.write_facility_type(Uuid::new_v4(), dto, false).await?;
        info!(facility_type_id = %facility_type.id, code = %facility_type.code, "Facility type created");
        Ok(facility_type)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_facility_type(
        &self,
        id: Uuid,
        dto: FacilityTypeDto,
    ) -> Result<facility_type::Model, ServiceError> {
        let existing = exists::<facility_type::Entity>(&self.db, id).await?;
        let facility_type = self.write_facility_type(id, dto, existing).await?;
        info!(facility_type_id = %id, created = !existing, "Facility type saved");
        Ok(facility_type)
    }

    #[instrument(skip(self))]
    pub async fn delete_facility_type(&self, id: Uuid) -> Result<(), ServiceError> {
        ensure_unreferenced::<facility::Entity>(
            &self.db,
            facility::Column::TypeId,
            id,
            messages::ERROR_FACILITY_TYPE_IN_USE,
        )
        .await?;
        delete_existing::<facility_type::Entity>(
            &self.db,
            id,
            messages::ERROR_FACILITY_TYPE_NOT_FOUND,
        )
        .await?;
        info!(facility_type_id = %id, "Facility type deleted");
        Ok(())
    }

    async fn write_facility_type(
        &self,
        id: Uuid,
        dto: FacilityTypeDto,
        existing: bool,
    ) -> Result<facility_type::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<facility_type::Entity>(
            &self.db,
            facility_type::Column::Code,
            dto.code.as_str(),
            facility_type::Column::Id,
            id,
            messages::ERROR_FACILITY_TYPE_CODE_DUPLICATED,
        )
        .await?;

        let active = dto.into_active_model(id);
        let facility_type = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(facility_type)
    }
}
