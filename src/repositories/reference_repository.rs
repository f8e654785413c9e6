use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::entities::{processing_schedule, program};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<program::Model>, ServiceError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessingScheduleRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<processing_schedule::Model>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct DbProgramRepository {
    base: BaseRepository,
}

impl DbProgramRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProgramRepository for DbProgramRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<program::Model>, ServiceError> {
        Ok(program::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await?)
    }
}

#[derive(Debug, Clone)]
pub struct DbProcessingScheduleRepository {
    base: BaseRepository,
}

impl DbProcessingScheduleRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProcessingScheduleRepository for DbProcessingScheduleRepository {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<processing_schedule::Model>, ServiceError> {
        Ok(processing_schedule::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await?)
    }
}
