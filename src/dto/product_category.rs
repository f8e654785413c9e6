use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::product_category;

/// Category products are grouped under, shown in `displayOrder`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategoryDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub display_name: String,
    #[serde(default)]
    pub display_order: i32,
}

impl From<&product_category::Model> for ProductCategoryDto {
    fn from(model: &product_category::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.code.clone(),
            display_name: model.display_name.clone(),
            display_order: model.display_order,
        }
    }
}

impl ProductCategoryDto {
    pub fn into_active_model(self, id: Uuid) -> product_category::ActiveModel {
        product_category::ActiveModel {
            id: Set(id),
            code: Set(self.code),
            display_name: Set(self.display_name),
            display_order: Set(self.display_order),
        }
    }
}
