use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::GeographicLevelDto;
use crate::entities::{geographic_level, geographic_zone};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::fetch_page;

use super::{delete_existing, ensure_unique, ensure_unreferenced, exists, require_found};

#[derive(Clone)]
pub struct GeographicLevelService {
    db: Arc<DatabaseConnection>,
}

impl GeographicLevelService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Levels ordered from the top of the hierarchy down.
    #[instrument(skip(self))]
    pub async fn list_levels(
        &self,
        page: PageRequest,
    ) -> Result<Page<geographic_level::Model>, ServiceError> {
        let select =
            geographic_level::Entity::find().order_by_asc(geographic_level::Column::LevelNumber);
        fetch_page(&self.db, select, page).await
    }

    #[instrument(skip(self))]
    pub async fn get_level(&self, id: Uuid) -> Result<geographic_level::Model, ServiceError> {
        require_found::<geographic_level::Entity>(
            &self.db,
            id,
            messages::ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND,
        )
        .await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_level(
        &self,
        dto: GeographicLevelDto,
    ) -> Result<geographic_level::Model, ServiceError> {
        let level = self.write_level(Uuid::new_v4(), dto, false).await?;
        info!(level_id = %level.id, level_number = level.level_number, "Geographic level created");
        Ok(level)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_level(
        &self,
        id: Uuid,
        dto: GeographicLevelDto,
    ) -> Result<geographic_level::Model, ServiceError> {
        let existing = exists::<geographic_level::Entity>(&self.db, id).await?;
        let level = self.write_level(id, dto, existing).await?;
        info!(level_id = %id, created = !existing, "Geographic level saved");
        Ok(level)
    }

    #[instrument(skip(self))]
    pub async fn delete_level(&self, id: Uuid) -> Result<(), ServiceError> {
        ensure_unreferenced::<geographic_zone::Entity>(
            &self.db,
            geographic_zone::Column::LevelId,
            id,
            messages::ERROR_GEOGRAPHIC_LEVEL_IN_USE,
        )
        .await?;
        delete_existing::<geographic_level::Entity>(
            &self.db,
            id,
            messages::ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND,
        )
        .await?;
        info!(level_id = %id, "Geographic level deleted");
        Ok(())
    }

    async fn write_level(
        &self,
        id: Uuid,
        dto: GeographicLevelDto,
        existing: bool,
    ) -> Result<geographic_level::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<geographic_level::Entity>(
            &self.db,
            geographic_level::Column::Code,
            dto.code.as_str(),
            geographic_level::Column::Id,
            id,
            messages::ERROR_GEOGRAPHIC_LEVEL_CODE_DUPLICATED,
        )
        .await?;
        ensure_unique::<geographic_level::Entity>(
            &self.db,
            geographic_level::Column::LevelNumber,
            dto.level_number,
            geographic_level::Column::Id,
            id,
            messages::ERROR_GEOGRAPHIC_LEVEL_NUMBER_DUPLICATED,
        )
        .await?;

        let active = dto.into_active_model(id);
        let level = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(level)
    }
}
