use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::{extra_data_from_json, extra_data_to_json, ExtraData};
use crate::entities::user;

/// Required fields are checked by the user service so each failure carries its own message key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub timezone: Option<String>,
    #[serde(default)]
    pub home_facility_id: Option<Uuid>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default = "super::default_true")]
    pub active: bool,
    #[serde(default)]
    pub login_restricted: bool,
    pub allow_notify: Option<bool>,
    #[serde(default)]
    pub extra_data: ExtraData,
}

impl From<&user::Model> for UserDto {
    fn from(model: &user::Model) -> Self {
        Self {
            id: Some(model.id),
            username: model.username.clone(),
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            email: model.email.clone(),
            timezone: model.timezone.clone(),
            home_facility_id: model.home_facility_id,
            verified: model.verified,
            active: model.active,
            login_restricted: model.login_restricted,
            allow_notify: model.allow_notify,
            extra_data: extra_data_from_json(model.extra_data.as_ref()),
        }
    }
}

impl UserDto {
    pub fn into_active_model(self, id: Uuid) -> user::ActiveModel {
        user::ActiveModel {
            id: Set(id),
            username: Set(self.username),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            timezone: Set(self.timezone),
            home_facility_id: Set(self.home_facility_id),
            verified: Set(self.verified),
            active: Set(self.active),
            login_restricted: Set(self.login_restricted),
            allow_notify: Set(self.allow_notify),
            extra_data: Set(extra_data_to_json(&self.extra_data)),
        }
    }
}
