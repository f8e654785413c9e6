use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::common::contains_extra_data;
use crate::dto::UserDto;
use crate::entities::{facility, user};
use crate::errors::ServiceError;
use crate::messages;

use super::user_search_params::UserSearchParams;
use super::{delete_existing, exists, require_found, require_reference};

#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Users matching every given filter, ordered by username.
    /// Empty params list everyone.
    #[instrument(skip(self))]
    pub async fn search(&self, params: UserSearchParams) -> Result<Vec<user::Model>, ServiceError> {
        let mut select = user::Entity::find();

        if !params.is_empty() {
            let ids = params.ids()?;
            if !ids.is_empty() {
                select = select.filter(user::Column::Id.is_in(ids));
            }
            if let Some(home_facility_id) = params.home_facility_uuid()? {
                select = select.filter(user::Column::HomeFacilityId.eq(home_facility_id));
            }
            if let Some(username) = &params.username {
                select = select.filter(user::Column::Username.eq(username.as_str()));
            }
            if let Some(first_name) = &params.first_name {
                select = select.filter(user::Column::FirstName.eq(first_name.as_str()));
            }
            if let Some(last_name) = &params.last_name {
                select = select.filter(user::Column::LastName.eq(last_name.as_str()));
            }
            if let Some(email) = &params.email {
                select = select.filter(user::Column::Email.eq(email.as_str()));
            }
            if let Some(verified) = params.verified {
                select = select.filter(user::Column::Verified.eq(verified));
            }
            if let Some(active) = params.active {
                select = select.filter(user::Column::Active.eq(active));
            }
            if let Some(login_restricted) = params.login_restricted {
                select = select.filter(user::Column::LoginRestricted.eq(login_restricted));
            }
        }

        let users = select
            .order_by_asc(user::Column::Username)
            .all(&*self.db)
            .await?;
        Ok(users
            .into_iter()
            .filter(|u| contains_extra_data(u.extra_data.as_ref(), &params.extra_data))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        require_found::<user::Entity>(&self.db, id, messages::ERROR_USER_NOT_FOUND).await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_user(&self, dto: UserDto) -> Result<user::Model, ServiceError> {
        let user = self.write_user(Uuid::new_v4(), dto, false).await?;
        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_user(&self, id: Uuid, dto: UserDto) -> Result<user::Model, ServiceError> {
        let existing = exists::<user::Entity>(&self.db, id).await?;
        let user = self.write_user(id, dto, existing).await?;
        info!(user_id = %id, created = !existing, "User saved");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_existing::<user::Entity>(&self.db, id, messages::ERROR_USER_NOT_FOUND).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn write_user(
        &self,
        id: Uuid,
        dto: UserDto,
        existing: bool,
    ) -> Result<user::Model, ServiceError> {
        check_fields(&dto)?;
        self.ensure_available(
            user::Column::Username,
            &dto.username,
            id,
            messages::ERROR_USER_USERNAME_DUPLICATED,
        )
        .await?;
        self.ensure_available(
            user::Column::Email,
            &dto.email,
            id,
            messages::ERROR_USER_EMAIL_DUPLICATED,
        )
        .await?;
        if let Some(facility_id) = dto.home_facility_id {
            require_reference::<facility::Entity>(
                &self.db,
                facility_id,
                messages::ERROR_FACILITY_NOT_FOUND,
            )
            .await?;
        }

        let active = dto.into_active_model(id);
        let user = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(user)
    }

    /// Usernames and emails are unique among users other than `id`.
    async fn ensure_available(
        &self,
        column: user::Column,
        value: &str,
        id: Uuid,
        key: &str,
    ) -> Result<(), ServiceError> {
        let taken = user::Entity::find()
            .filter(column.eq(value))
            .filter(user::Column::Id.ne(id))
            .one(&*self.db)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::validation(key, value));
        }
        Ok(())
    }
}

/// Checks that need no database access.
fn check_fields(dto: &UserDto) -> Result<(), ServiceError> {
    let required = [
        ("username", &dto.username),
        ("firstName", &dto.first_name),
        ("lastName", &dto.last_name),
        ("email", &dto.email),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ServiceError::validation(
                messages::ERROR_USER_FIELD_REQUIRED,
                field,
            ));
        }
    }
    if !validator::validate_email(dto.email.as_str()) {
        return Err(ServiceError::validation(
            messages::ERROR_USER_EMAIL_INVALID,
            &dto.email,
        ));
    }
    Ok(())
}
