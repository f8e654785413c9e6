use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::requisition_group;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionGroupDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub supervisory_node_id: Uuid,
    #[serde(default)]
    pub member_facility_ids: BTreeSet<Uuid>,
}

impl RequisitionGroupDto {
    /// Export needs the member rows, which live in their own table.
    pub fn export(
        model: &requisition_group::Model,
        member_facility_ids: impl IntoIterator<Item = Uuid>,
    ) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            name: model.name.clone(),
            description: model.description.clone(),
            supervisory_node_id: model.supervisory_node_id,
            member_facility_ids: member_facility_ids.into_iter().collect(),
        }
    }

    /// Splits the DTO into the group row and its member facility ids.
    pub fn into_active_model(self, id: Uuid) -> (requisition_group::ActiveModel, BTreeSet<Uuid>) {
        let group = requisition_group::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            supervisory_node_id: Set(self.supervisory_node_id),
        };
        (group, self.member_facility_ids)
    }
}
