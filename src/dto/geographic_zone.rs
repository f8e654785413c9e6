use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::geographic_zone;

/// A zone refers to its level and parent by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeographicZoneDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    pub name: Option<String>,
    pub level_id: Uuid,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub catchment_population: Option<i32>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<&geographic_zone::Model> for GeographicZoneDto {
    fn from(model: &geographic_zone::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            level_id: model.level_id,
            parent_id: model.parent_id,
            catchment_population: model.catchment_population,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}

impl GeographicZoneDto {
    pub fn into_active_model(self, id: Uuid) -> geographic_zone::ActiveModel {
        geographic_zone::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            level_id: Set(self.level_id),
            parent_id: Set(self.parent_id),
            catchment_population: Set(self.catchment_population),
            latitude: Set(self.latitude),
            longitude: Set(self.longitude),
        }
    }
}
