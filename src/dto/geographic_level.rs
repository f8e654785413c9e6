use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::geographic_level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeographicLevelDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub level_number: i32,
}

impl From<&geographic_level::Model> for GeographicLevelDto {
    fn from(model: &geographic_level::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            level_number: model.level_number,
        }
    }
}

impl GeographicLevelDto {
    pub fn into_active_model(self, id: Uuid) -> geographic_level::ActiveModel {
        geographic_level::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            level_number: Set(self.level_number),
        }
    }
}
