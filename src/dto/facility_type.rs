use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::facility_type;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityTypeDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    #[serde(default = "super::default_true")]
    pub active: bool,
}

impl From<&facility_type::Model> for FacilityTypeDto {
    fn from(model: &facility_type::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            description: model.description.clone(),
            display_order: model.display_order,
            active: model.active,
        }
    }
}

impl FacilityTypeDto {
    pub fn into_active_model(self, id: Uuid) -> facility_type::ActiveModel {
        facility_type::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            display_order: Set(self.display_order),
            active: Set(self.active),
        }
    }
}
