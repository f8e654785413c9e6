use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::supervisory_node;

/// Children and requisition group are derived on export and ignored on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupervisoryNodeDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub facility_id: Option<Uuid>,
    #[serde(default)]
    pub parent_node_id: Option<Uuid>,
    #[serde(default)]
    pub child_node_ids: BTreeSet<Uuid>,
    #[serde(default)]
    pub requisition_group_id: Option<Uuid>,
}

impl SupervisoryNodeDto {
    pub fn export(
        model: &supervisory_node::Model,
        child_node_ids: impl IntoIterator<Item = Uuid>,
        requisition_group_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            description: model.description.clone(),
            facility_id: model.facility_id,
            parent_node_id: model.parent_id,
            child_node_ids: child_node_ids.into_iter().collect(),
            requisition_group_id,
        }
    }

    pub fn into_active_model(self, id: Uuid) -> supervisory_node::ActiveModel {
        supervisory_node::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            facility_id: Set(self.facility_id),
            parent_id: Set(self.parent_node_id),
        }
    }
}
