use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::processing_period;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingPeriodDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub processing_schedule_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<&processing_period::Model> for ProcessingPeriodDto {
    fn from(model: &processing_period::Model) -> Self {
        Self {
            id: Some(model.id),
            processing_schedule_id: model.processing_schedule_id,
            name: model.name.clone(),
            description: model.description.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

impl ProcessingPeriodDto {
    pub fn into_active_model(self, id: Uuid) -> processing_period::ActiveModel {
        processing_period::ActiveModel {
            id: Set(id),
            processing_schedule_id: Set(self.processing_schedule_id),
            name: Set(self.name),
            description: Set(self.description),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
        }
    }
}
