use async_trait::async_trait;
use sea_orm::{sea_query::Query, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::entities::{requisition_group_member, requisition_group_program_schedule};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequisitionGroupProgramScheduleRepository: Send + Sync {
    /// Links for `program_id` whose requisition group has `facility_id` as a member.
    async fn search(
        &self,
        program_id: Uuid,
        facility_id: Uuid,
    ) -> Result<Vec<requisition_group_program_schedule::Model>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct DbRequisitionGroupProgramScheduleRepository {
    base: BaseRepository,
}

impl DbRequisitionGroupProgramScheduleRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl RequisitionGroupProgramScheduleRepository for DbRequisitionGroupProgramScheduleRepository {
    async fn search(
        &self,
        program_id: Uuid,
        facility_id: Uuid,
    ) -> Result<Vec<requisition_group_program_schedule::Model>, ServiceError> {
        let groups_with_facility = Query::select()
            .column(requisition_group_member::Column::RequisitionGroupId)
            .from(requisition_group_member::Entity)
            .and_where(requisition_group_member::Column::FacilityId.eq(facility_id))
            .to_owned();

        Ok(requisition_group_program_schedule::Entity::find()
            .filter(requisition_group_program_schedule::Column::ProgramId.eq(program_id))
            .filter(
                requisition_group_program_schedule::Column::RequisitionGroupId
                    .in_subquery(groups_with_facility),
            )
            .all(self.base.get_db())
            .await?)
    }
}
