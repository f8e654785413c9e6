use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::processing_schedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingScheduleDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    /// Set by the server on every write
    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,
}

impl From<&processing_schedule::Model> for ProcessingScheduleDto {
    fn from(model: &processing_schedule::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            description: model.description.clone(),
            modified_date: Some(model.modified_date),
        }
    }
}

impl ProcessingScheduleDto {
    pub fn into_active_model(self, id: Uuid) -> processing_schedule::ActiveModel {
        processing_schedule::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            modified_date: NotSet,
        }
    }
}
