use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::common::{Page, PageRequest};
use crate::dto::RequisitionGroupProgramScheduleDto;
use crate::entities::{
    facility, processing_schedule, program, requisition_group, requisition_group_program_schedule,
};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::{
    fetch_page, DbRequisitionGroupProgramScheduleRepository,
    RequisitionGroupProgramScheduleRepository,
};

use super::processing_schedules::{require_program_and_facility, ProgramFacilityParams};
use super::{delete_existing, exists, require_found, require_reference};

/// Links between a requisition group, a program and the schedule they follow
#[derive(Clone)]
pub struct RequisitionGroupProgramScheduleService {
    db: Arc<DatabaseConnection>,
    schedule_links: Arc<dyn RequisitionGroupProgramScheduleRepository>,
}

impl RequisitionGroupProgramScheduleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let schedule_links = Arc::new(DbRequisitionGroupProgramScheduleRepository::new(db.clone()));
        Self { db, schedule_links }
    }

    #[instrument(skip(self))]
    pub async fn list_links(
        &self,
        page: PageRequest,
    ) -> Result<Page<requisition_group_program_schedule::Model>, ServiceError> {
        let select = requisition_group_program_schedule::Entity::find()
            .order_by_asc(requisition_group_program_schedule::Column::RequisitionGroupId)
            .order_by_asc(requisition_group_program_schedule::Column::ProgramId);
        fetch_page(&self.db, select, page).await
    }

    #[instrument(skip(self))]
    pub async fn search_links(
        &self,
        params: ProgramFacilityParams,
    ) -> Result<Vec<requisition_group_program_schedule::Model>, ServiceError> {
        let (program_id, facility_id) =
            params.require_both(messages::ERROR_SEARCH_PARAMS_INVALID)?;
        require_program_and_facility(&self.db, program_id, facility_id).await?;
        self.schedule_links.search(program_id, facility_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_link(
        &self,
        id: Uuid,
    ) -> Result<requisition_group_program_schedule::Model, ServiceError> {
        require_found::<requisition_group_program_schedule::Entity>(
            &self.db,
            id,
            messages::ERROR_REQUISITION_GROUP_PROGRAM_SCHEDULE_NOT_FOUND,
        )
        .await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_link(
        &self,
        dto: RequisitionGroupProgramScheduleDto,
    ) -> Result<requisition_group_program_schedule::Model, ServiceError> {
        let link = self.write_link(Uuid::new_v4(), dto, false).await?;
        info!(
            link_id = %link.id,
            group_id = %link.requisition_group_id,
            program_id = %link.program_id,
            "Requisition group program schedule created"
        );
        Ok(link)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_link(
        &self,
        id: Uuid,
        dto: RequisitionGroupProgramScheduleDto,
    ) -> Result<requisition_group_program_schedule::Model, ServiceError> {
        let existing = exists::<requisition_group_program_schedule::Entity>(&self.db, id).await?;
        let link = self.write_link(id, dto, existing).await?;
        info!(link_id = %id, created = !existing, "Requisition group program schedule saved");
        Ok(link)
    }

    #[instrument(skip(self))]
    pub async fn delete_link(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_existing::<requisition_group_program_schedule::Entity>(
            &self.db,
            id,
            messages::ERROR_REQUISITION_GROUP_PROGRAM_SCHEDULE_NOT_FOUND,
        )
        .await?;
        info!(link_id = %id, "Requisition group program schedule deleted");
        Ok(())
    }

    async fn write_link(
        &self,
        id: Uuid,
        dto: RequisitionGroupProgramScheduleDto,
        existing: bool,
    ) -> Result<requisition_group_program_schedule::Model, ServiceError> {
        require_reference::<requisition_group::Entity>(
            &self.db,
            dto.requisition_group_id,
            messages::ERROR_REQUISITION_GROUP_NOT_FOUND,
        )
        .await?;
        require_reference::<program::Entity>(
            &self.db,
            dto.program_id,
            messages::ERROR_PROGRAM_NOT_FOUND,
        )
        .await?;
        require_reference::<processing_schedule::Entity>(
            &self.db,
            dto.processing_schedule_id,
            messages::ERROR_PROCESSING_SCHEDULE_NOT_FOUND,
        )
        .await?;
        if let Some(drop_off_id) = dto.drop_off_facility_id {
            require_reference::<facility::Entity>(
                &self.db,
                drop_off_id,
                messages::ERROR_FACILITY_NOT_FOUND,
            )
            .await?;
        }

        // One link per group and program
        let duplicate = requisition_group_program_schedule::Entity::find()
            .filter(
                requisition_group_program_schedule::Column::RequisitionGroupId
                    .eq(dto.requisition_group_id),
            )
            .filter(requisition_group_program_schedule::Column::ProgramId.eq(dto.program_id))
            .filter(requisition_group_program_schedule::Column::Id.ne(id))
            .one(&*self.db)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::conflict(
                messages::ERROR_REQUISITION_GROUP_PROGRAM_SCHEDULE_DUPLICATED,
                dto.program_id,
            ));
        }

        let active = dto.into_active_model(id);
        let link = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(link)
    }
}
