use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::ProcessingPeriodDto;
use crate::entities::processing_period;
use crate::errors::{Message, ServiceError};
use crate::messages;
use crate::repositories::{
    DbFacilityRepository, DbProcessingPeriodRepository, DbProcessingScheduleRepository,
    DbProgramRepository, DbRequisitionGroupProgramScheduleRepository, FacilityRepository,
    ProcessingPeriodRepository, ProcessingScheduleRepository, ProgramRepository,
    RequisitionGroupProgramScheduleRepository,
};

use super::{delete_existing, exists, require_found};

/// Query parameters of the period search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProcessingPeriodSearchParams {
    pub program_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
    pub processing_schedule_id: Option<Uuid>,
    /// Only periods starting on or before this date
    pub start_date: Option<NaiveDate>,
}

impl ProcessingPeriodSearchParams {
    pub fn is_empty(&self) -> bool {
        self.program_id.is_none()
            && self.facility_id.is_none()
            && self.processing_schedule_id.is_none()
            && self.start_date.is_none()
    }
}

#[derive(Clone)]
pub struct ProcessingPeriodService {
    db: Arc<DatabaseConnection>,
    periods: Arc<dyn ProcessingPeriodRepository>,
    schedules: Arc<dyn ProcessingScheduleRepository>,
    programs: Arc<dyn ProgramRepository>,
    facilities: Arc<dyn FacilityRepository>,
    schedule_links: Arc<dyn RequisitionGroupProgramScheduleRepository>,
}

impl ProcessingPeriodService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            periods: Arc::new(DbProcessingPeriodRepository::new(db.clone())),
            schedules: Arc::new(DbProcessingScheduleRepository::new(db.clone())),
            programs: Arc::new(DbProgramRepository::new(db.clone())),
            facilities: Arc::new(DbFacilityRepository::new(db.clone())),
            schedule_links: Arc::new(DbRequisitionGroupProgramScheduleRepository::new(
                db.clone(),
            )),
            db,
        }
    }

    pub fn with_repositories(
        db: Arc<DatabaseConnection>,
        periods: Arc<dyn ProcessingPeriodRepository>,
        schedules: Arc<dyn ProcessingScheduleRepository>,
        programs: Arc<dyn ProgramRepository>,
        facilities: Arc<dyn FacilityRepository>,
        schedule_links: Arc<dyn RequisitionGroupProgramScheduleRepository>,
    ) -> Self {
        Self {
            db,
            periods,
            schedules,
            programs,
            facilities,
            schedule_links,
        }
    }

    /// Finds the periods of one schedule.
    ///
    /// The schedule is either given directly or looked up through the
    /// requisition group linking the program and facility. A pair with no
    /// linked schedule yields an empty page.
    #[instrument(skip(self))]
    pub async fn search_periods(
        &self,
        params: ProcessingPeriodSearchParams,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError> {
        if params.is_empty() {
            return self.periods.find_all(page).await;
        }

        let schedule_id = match (
            params.processing_schedule_id,
            params.program_id,
            params.facility_id,
        ) {
            (Some(schedule_id), _, _) => {
                self.schedules
                    .find_by_id(schedule_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::not_found(
                            messages::ERROR_PROCESSING_SCHEDULE_NOT_FOUND,
                            schedule_id,
                        )
                    })?
                    .id
            }
            (None, Some(program_id), Some(facility_id)) => {
                match self.schedule_for(program_id, facility_id).await? {
                    Some(schedule_id) => schedule_id,
                    None => return Ok(Page::empty(page)),
                }
            }
            _ => {
                return Err(ServiceError::ValidationError(Message::new(
                    messages::ERROR_PROCESSING_PERIOD_SEARCH_PARAMS_INCOMPLETE,
                )))
            }
        };

        match params.start_date {
            Some(date) => {
                self.periods
                    .find_by_schedule_starting_on_or_before(schedule_id, date, page)
                    .await
            }
            None => self.periods.find_by_schedule(schedule_id, page).await,
        }
    }

    /// Schedule linked to the program for a group the facility belongs to.
    async fn schedule_for(
        &self,
        program_id: Uuid,
        facility_id: Uuid,
    ) -> Result<Option<Uuid>, ServiceError> {
        if self.programs.find_by_id(program_id).await?.is_none() {
            return Err(ServiceError::not_found(
                messages::ERROR_PROGRAM_NOT_FOUND,
                program_id,
            ));
        }
        if self.facilities.find_by_id(facility_id).await?.is_none() {
            return Err(ServiceError::not_found(
                messages::ERROR_FACILITY_NOT_FOUND,
                facility_id,
            ));
        }

        let links = self
            .schedule_links
            .search(program_id, facility_id)
            .await?;
        if links.len() > 1 {
            debug!(
                %program_id,
                %facility_id,
                link_count = links.len(),
                "Several schedules linked, using the first"
            );
        }
        Ok(links.first().map(|link| link.processing_schedule_id))
    }

    #[instrument(skip(self))]
    pub async fn get_period(&self, id: Uuid) -> Result<processing_period::Model, ServiceError> {
        require_found::<processing_period::Entity>(
            &self.db,
            id,
            messages::ERROR_PROCESSING_PERIOD_NOT_FOUND,
        )
        .await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_period(
        &self,
        dto: ProcessingPeriodDto,
    ) -> Result<processing_period::Model, ServiceError> {
        self.validate_period(&dto, true).await?;
        let period = dto.into_active_model(Uuid::new_v4()).insert(&*self.db).await?;
        info!(
            period_id = %period.id,
            schedule_id = %period.processing_schedule_id,
            "Processing period created"
        );
        Ok(period)
    }

    /// Replaces the period stored under `id`. A period created this way
    /// must still continue its schedule without a gap.
    #[instrument(skip(self, dto))]
    pub async fn save_period(
        &self,
        id: Uuid,
        dto: ProcessingPeriodDto,
    ) -> Result<processing_period::Model, ServiceError> {
        let existing = exists::<processing_period::Entity>(&self.db, id).await?;
        self.validate_period(&dto, !existing).await?;

        let active = dto.into_active_model(id);
        let period = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        info!(period_id = %id, created = !existing, "Processing period saved");
        Ok(period)
    }

    #[instrument(skip(self))]
    pub async fn delete_period(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_existing::<processing_period::Entity>(
            &self.db,
            id,
            messages::ERROR_PROCESSING_PERIOD_NOT_FOUND,
        )
        .await?;
        info!(period_id = %id, "Processing period deleted");
        Ok(())
    }

    async fn validate_period(
        &self,
        dto: &ProcessingPeriodDto,
        appended: bool,
    ) -> Result<(), ServiceError> {
        dto.validate()?;

        let schedule_id = dto.processing_schedule_id;
        if self.schedules.find_by_id(schedule_id).await?.is_none() {
            return Err(ServiceError::validation(
                messages::ERROR_PROCESSING_SCHEDULE_NOT_FOUND,
                schedule_id,
            ));
        }

        if dto.end_date < dto.start_date {
            return Err(ServiceError::ValidationError(
                Message::new(messages::ERROR_PROCESSING_PERIOD_END_DATE_BEFORE_START_DATE)
                    .with_param(dto.start_date)
                    .with_param(dto.end_date),
            ));
        }

        if appended {
            if let Some(last) = self.periods.find_last_of_schedule(schedule_id).await? {
                let expected_start = last.end_date.succ_opt();
                if expected_start != Some(dto.start_date) {
                    return Err(ServiceError::ValidationError(
                        Message::new(messages::ERROR_PROCESSING_PERIOD_START_DATE_GAP)
                            .with_param(dto.start_date)
                            .with_param(last.end_date),
                    ));
                }
            }
        }
        Ok(())
    }
}
