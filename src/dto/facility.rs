use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{extra_data_from_json, extra_data_to_json, ExtraData};
use crate::entities::facility;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub geographic_zone_id: Uuid,
    pub type_id: Uuid,
    #[serde(default = "super::default_true")]
    pub active: bool,
    #[serde(default = "super::default_true")]
    pub enabled: bool,
    pub go_live_date: Option<NaiveDate>,
    pub go_down_date: Option<NaiveDate>,
    pub comment: Option<String>,
    #[serde(default)]
    pub extra_data: ExtraData,
}

impl From<&facility::Model> for FacilityDto {
    fn from(model: &facility::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            description: model.description.clone(),
            geographic_zone_id: model.geographic_zone_id,
            type_id: model.type_id,
            active: model.active,
            enabled: model.enabled,
            go_live_date: model.go_live_date,
            go_down_date: model.go_down_date,
            comment: model.comment.clone(),
            extra_data: extra_data_from_json(model.extra_data.as_ref()),
        }
    }
}

impl FacilityDto {
    pub fn into_active_model(self, id: Uuid) -> facility::ActiveModel {
        facility::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            geographic_zone_id: Set(self.geographic_zone_id),
            type_id: Set(self.type_id),
            active: Set(self.active),
            enabled: Set(self.enabled),
            go_live_date: Set(self.go_live_date),
            go_down_date: Set(self.go_down_date),
            comment: Set(self.comment),
            extra_data: Set(extra_data_to_json(&self.extra_data)),
        }
    }
}
