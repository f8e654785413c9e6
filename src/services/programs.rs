use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::ProgramDto;
use crate::entities::{program, requisition_group_program_schedule};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::fetch_page;

use super::{delete_existing, ensure_unique, ensure_unreferenced, exists, require_found};

#[derive(Clone)]
pub struct ProgramService {
    db: Arc<DatabaseConnection>,
}

impl ProgramService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_programs(
        &self,
        page: PageRequest,
    ) -> Result<Page<program::Model>, ServiceError> {
        let select = program::Entity::find().order_by_asc(program::Column::Code);
        fetch_page(&self.db, select, page).await
    }

    #[instrument(skip(self))]
    pub async fn get_program(&self, id: Uuid) -> Result<program::Model, ServiceError> {
        require_found::<program::Entity>(&self.db, id, messages::ERROR_PROGRAM_NOT_FOUND).await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_program(&self, dto: ProgramDto) -> Result<program::Model, ServiceError> {
        let program = self.write_program(Uuid::new_v4(), dto, false).await?;
        info!(program_id = %program.id, code = %program.code, "Program created");
        Ok(program)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_program(
        &self,
        id: Uuid,
        dto: ProgramDto,
    ) -> Result<program::Model, ServiceError> {
        let existing = exists::<program::Entity>(&self.db, id).await?;
        let program = self.write_program(id, dto, existing).await?;
        info!(program_id = %id, created = !existing, "Program saved");
        Ok(program)
    }

    #[instrument(skip(self))]
    pub async fn delete_program(&self, id: Uuid) -> Result<(), ServiceError> {
        ensure_unreferenced::<requisition_group_program_schedule::Entity>(
            &self.db,
            requisition_group_program_schedule::Column::ProgramId,
            id,
            messages::ERROR_PROGRAM_IN_USE,
        )
        .await?;
        delete_existing::<program::Entity>(&self.db, id, messages::ERROR_PROGRAM_NOT_FOUND).await?;
        info!(program_id = %id, "Program deleted");
        Ok(())
    }

    async fn write_program(
        &self,
        id: Uuid,
        dto: ProgramDto,
        existing: bool,
    ) -> Result<program::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<program::Entity>(
            &self.db,
            program::Column::Code,
            dto.code.as_str(),
            program::Column::Id,
            id,
            messages::ERROR_PROGRAM_CODE_DUPLICATED,
        )
        .await?;

        let active = dto.into_active_model(id);
        let program = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(program)
    }
}
