use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::program;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default = "super::default_true")]
    pub active: bool,
    #[serde(default)]
    pub periods_skippable: bool,
    #[serde(default)]
    pub show_non_full_supply_tab: bool,
}

impl From<&program::Model> for ProgramDto {
    fn from(model: &program::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            description: model.description.clone(),
            active: model.active,
            periods_skippable: model.periods_skippable,
            show_non_full_supply_tab: model.show_non_full_supply_tab,
        }
    }
}

impl ProgramDto {
    pub fn into_active_model(self, id: Uuid) -> program::ActiveModel {
        program::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            active: Set(self.active),
            periods_skippable: Set(self.periods_skippable),
            show_non_full_supply_tab: Set(self.show_non_full_supply_tab),
        }
    }
}
