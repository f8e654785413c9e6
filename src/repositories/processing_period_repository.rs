use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::common::{Page, PageRequest};
use crate::entities::processing_period;
use crate::errors::ServiceError;

use super::{fetch_page, BaseRepository, Repository};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessingPeriodRepository: Send + Sync {
    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError>;

    async fn find_by_schedule(
        &self,
        schedule_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError>;

    /// Periods of the schedule whose start date is on or before `date`.
    async fn find_by_schedule_starting_on_or_before(
        &self,
        schedule_id: Uuid,
        date: NaiveDate,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError>;

    /// The period of the schedule with the latest end date.
    async fn find_last_of_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Option<processing_period::Model>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct DbProcessingPeriodRepository {
    base: BaseRepository,
}

impl DbProcessingPeriodRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProcessingPeriodRepository for DbProcessingPeriodRepository {
    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError> {
        let select = processing_period::Entity::find()
            .order_by_asc(processing_period::Column::StartDate)
            .order_by_asc(processing_period::Column::Id);
        fetch_page(self.base.get_db(), select, page).await
    }

    async fn find_by_schedule(
        &self,
        schedule_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError> {
        let select = processing_period::Entity::find()
            .filter(processing_period::Column::ProcessingScheduleId.eq(schedule_id))
            .order_by_asc(processing_period::Column::StartDate);
        fetch_page(self.base.get_db(), select, page).await
    }

    async fn find_by_schedule_starting_on_or_before(
        &self,
        schedule_id: Uuid,
        date: NaiveDate,
        page: PageRequest,
    ) -> Result<Page<processing_period::Model>, ServiceError> {
        let select = processing_period::Entity::find()
            .filter(processing_period::Column::ProcessingScheduleId.eq(schedule_id))
            .filter(processing_period::Column::StartDate.lte(date))
            .order_by_asc(processing_period::Column::StartDate);
        fetch_page(self.base.get_db(), select, page).await
    }

    async fn find_last_of_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Option<processing_period::Model>, ServiceError> {
        Ok(processing_period::Entity::find()
            .filter(processing_period::Column::ProcessingScheduleId.eq(schedule_id))
            .order_by_desc(processing_period::Column::EndDate)
            .one(self.base.get_db())
            .await?)
    }
}
