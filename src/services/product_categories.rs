use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::ProductCategoryDto;
use crate::entities::product_category;
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::fetch_page;

use super::{delete_existing, ensure_unique, exists, require_found};

/// Query parameters of the category search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct ProductCategorySearchParams {
    /// Exact category code
    pub code: Option<String>,
}

#[derive(Clone)]
pub struct ProductCategoryService {
    db: Arc<DatabaseConnection>,
}

impl ProductCategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<product_category::Model>, ServiceError> {
        let select = product_category::Entity::find()
            .order_by_asc(product_category::Column::DisplayOrder)
            .order_by_asc(product_category::Column::Code);
        fetch_page(&self.db, select, page).await
    }

    /// Every category, or the single one holding `code`. An unknown code is a 404.
    #[instrument(skip(self))]
    pub async fn search_categories(
        &self,
        params: ProductCategorySearchParams,
    ) -> Result<Vec<product_category::Model>, ServiceError> {
        match params.code {
            Some(code) => {
                let category = self.find_by_code(&code).await?.ok_or_else(|| {
                    ServiceError::not_found(messages::ERROR_PRODUCT_CATEGORY_NOT_FOUND, &code)
                })?;
                Ok(vec![category])
            }
            None => Ok(product_category::Entity::find()
                .order_by_asc(product_category::Column::DisplayOrder)
                .order_by_asc(product_category::Column::Code)
                .all(&*self.db)
                .await?),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> Result<product_category::Model, ServiceError> {
        require_found::<product_category::Entity>(
            &self.db,
            id,
            messages::ERROR_PRODUCT_CATEGORY_NOT_FOUND,
        )
        .await
    }

    /// Creates a category, or replaces the one that already holds the code.
    #[instrument(skip(self, dto))]
    pub async fn create_category(
        &self,
        dto: ProductCategoryDto,
    ) -> Result<product_category::Model, ServiceError> {
        dto.validate()?;
        let category = match self.find_by_code(&dto.code).await? {
            Some(found) => {
                let category = dto.into_active_model(found.id).update(&*self.db).await?;
                info!(category_id = %category.id, code = %category.code, "Product category replaced by code");
                category
            }
            None => {
                let category = dto.into_active_model(Uuid::new_v4()).insert(&*self.db).await?;
                info!(category_id = %category.id, code = %category.code, "Product category created");
                category
            }
        };
        Ok(category)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_category(
        &self,
        id: Uuid,
        dto: ProductCategoryDto,
    ) -> Result<product_category::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<product_category::Entity>(
            &self.db,
            product_category::Column::Code,
            dto.code.as_str(),
            product_category::Column::Id,
            id,
            messages::ERROR_PRODUCT_CATEGORY_CODE_DUPLICATED,
        )
        .await?;

        let existing = exists::<product_category::Entity>(&self.db, id).await?;
        let active = dto.into_active_model(id);
        let category = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        info!(category_id = %id, created = !existing, "Product category saved");
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_existing::<product_category::Entity>(
            &self.db,
            id,
            messages::ERROR_PRODUCT_CATEGORY_NOT_FOUND,
        )
        .await?;
        info!(category_id = %id, "Product category deleted");
        Ok(())
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<product_category::Model>, ServiceError> {
        Ok(product_category::Entity::find()
            .filter(product_category::Column::Code.eq(code))
            .one(&*self.db)
            .await?)
    }
}
