use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::requisition_group_program_schedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionGroupProgramScheduleDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub requisition_group_id: Uuid,
    pub program_id: Uuid,
    pub processing_schedule_id: Uuid,
    #[serde(default = "super::default_true")]
    pub direct_delivery: bool,
    #[serde(default)]
    pub drop_off_facility_id: Option<Uuid>,
}

impl From<&requisition_group_program_schedule::Model> for RequisitionGroupProgramScheduleDto {
    fn from(model: &requisition_group_program_schedule::Model) -> Self {
        Self {
            id: Some(model.id),
            requisition_group_id: model.requisition_group_id,
            program_id: model.program_id,
            processing_schedule_id: model.processing_schedule_id,
            direct_delivery: model.direct_delivery,
            drop_off_facility_id: model.drop_off_facility_id,
        }
    }
}

impl RequisitionGroupProgramScheduleDto {
    pub fn into_active_model(self, id: Uuid) -> requisition_group_program_schedule::ActiveModel {
        requisition_group_program_schedule::ActiveModel {
            id: Set(id),
            requisition_group_id: Set(self.requisition_group_id),
            program_id: Set(self.program_id),
            processing_schedule_id: Set(self.processing_schedule_id),
            direct_delivery: Set(self.direct_delivery),
            drop_off_facility_id: Set(self.drop_off_facility_id),
        }
    }
}
