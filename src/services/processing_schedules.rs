use std::collections::BTreeSet;
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::ProcessingScheduleDto;
use crate::entities::{
    facility, processing_schedule, program, requisition_group_program_schedule,
};
use crate::errors::{Message, ServiceError};
use crate::messages;
use crate::repositories::{
    fetch_page, DbRequisitionGroupProgramScheduleRepository,
    RequisitionGroupProgramScheduleRepository,
};

use super::{
    delete_existing, ensure_unique, ensure_unreferenced, exists, require_found, require_reference,
};

/// Program and facility pair shared by the schedule, link and supervisory node searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProgramFacilityParams {
    pub program_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
}

impl ProgramFacilityParams {
    /// Both ids, or a validation error keyed by `key`.
    pub fn require_both(&self, key: &str) -> Result<(Uuid, Uuid), ServiceError> {
        match (self.program_id, self.facility_id) {
            (Some(program_id), Some(facility_id)) => Ok((program_id, facility_id)),
            _ => Err(ServiceError::ValidationError(Message::new(key))),
        }
    }
}

/// Checks that the program and facility of a search exist.
pub(crate) async fn require_program_and_facility(
    db: &DatabaseConnection,
    program_id: Uuid,
    facility_id: Uuid,
) -> Result<(), ServiceError> {
    require_reference::<program::Entity>(db, program_id, messages::ERROR_PROGRAM_NOT_FOUND).await?;
    require_reference::<facility::Entity>(db, facility_id, messages::ERROR_FACILITY_NOT_FOUND)
        .await?;
    Ok(())
}

#[derive(Clone)]
pub struct ProcessingScheduleService {
    db: Arc<DatabaseConnection>,
    schedule_links: Arc<dyn RequisitionGroupProgramScheduleRepository>,
}

impl ProcessingScheduleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let schedule_links = Arc::new(DbRequisitionGroupProgramScheduleRepository::new(db.clone()));
        Self { db, schedule_links }
    }

    #[instrument(skip(self))]
    pub async fn list_schedules(
        &self,
        page: PageRequest,
    ) -> Result<Page<processing_schedule::Model>, ServiceError> {
        let select =
            processing_schedule::Entity::find().order_by_asc(processing_schedule::Column::Code);
        fetch_page(&self.db, select, page).await
    }

    /// Schedules linked to the program for the requisition groups the facility belongs to.
    #[instrument(skip(self))]
    pub async fn search_schedules(
        &self,
        params: ProgramFacilityParams,
    ) -> Result<Vec<processing_schedule::Model>, ServiceError> {
        let (program_id, facility_id) =
            params.require_both(messages::ERROR_PROCESSING_SCHEDULE_SEARCH_PARAMS_REQUIRED)?;
        require_program_and_facility(&self.db, program_id, facility_id).await?;

        let schedule_ids: BTreeSet<Uuid> = self
            .schedule_links
            .search(program_id, facility_id)
            .await?
            .into_iter()
            .map(|link| link.processing_schedule_id)
            .collect();
        if schedule_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(processing_schedule::Entity::find()
            .filter(processing_schedule::Column::Id.is_in(schedule_ids))
            .order_by_asc(processing_schedule::Column::Code)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_schedule(
        &self,
        id: Uuid,
    ) -> Result<processing_schedule::Model, ServiceError> {
        require_found::<processing_schedule::Entity>(
            &self.db,
            id,
            messages::ERROR_PROCESSING_SCHEDULE_NOT_FOUND,
        )
        .await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_schedule(
        &self,
        dto: ProcessingScheduleDto,
    ) -> Result<processing_schedule::Model, ServiceError> {
        let schedule = self.write_schedule(Uuid::new_v4(), dto, false).await?;
        info!(schedule_id = %schedule.id, code = %schedule.code, "Processing schedule created");
        Ok(schedule)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_schedule(
        &self,
        id: Uuid,
        dto: ProcessingScheduleDto,
    ) -> Result<processing_schedule::Model, ServiceError> {
        let existing = exists::<processing_schedule::Entity>(&self.db, id).await?;
        let schedule = self.write_schedule(id, dto, existing).await?;
        info!(schedule_id = %id, created = !existing, "Processing schedule saved");
        Ok(schedule)
    }

    #[instrument(skip(self))]
    pub async fn delete_schedule(&self, id: Uuid) -> Result<(), ServiceError> {
        ensure_unreferenced::<requisition_group_program_schedule::Entity>(
            &self.db,
            requisition_group_program_schedule::Column::ProcessingScheduleId,
            id,
            messages::ERROR_PROCESSING_SCHEDULE_IN_USE,
        )
        .await?;
        delete_existing::<processing_schedule::Entity>(
            &self.db,
            id,
            messages::ERROR_PROCESSING_SCHEDULE_NOT_FOUND,
        )
        .await?;
        info!(schedule_id = %id, "Processing schedule deleted");
        Ok(())
    }

    async fn write_schedule(
        &self,
        id: Uuid,
        dto: ProcessingScheduleDto,
        existing: bool,
    ) -> Result<processing_schedule::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<processing_schedule::Entity>(
            &self.db,
            processing_schedule::Column::Code,
            dto.code.as_str(),
            processing_schedule::Column::Id,
            id,
            messages::ERROR_PROCESSING_SCHEDULE_CODE_DUPLICATED,
        )
        .await?;
        ensure_unique::<processing_schedule::Entity>(
            &self.db,
            processing_schedule::Column::Name,
            dto.name.as_str(),
            processing_schedule::Column::Id,
            id,
            messages::ERROR_PROCESSING_SCHEDULE_NAME_DUPLICATED,
        )
        .await?;

        // modified_date is stamped by the entity's before_save hook
        let active = dto.into_active_model(id);
        let schedule = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(schedule)
    }
}
